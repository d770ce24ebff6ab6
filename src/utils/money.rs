// Sérialisation des montants : toujours 2 décimales ("5.00"), quel que soit
// le backend (SQLite relit les NUMERIC sans leur échelle).

use rust_decimal::Decimal;
use serde::Serializer;

pub const SCALE: u32 = 2;

pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let mut scaled = *value;
    scaled.rescale(SCALE);
    serializer.serialize_str(&scaled.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Price {
        #[serde(serialize_with = "super::serialize")]
        value: rust_decimal::Decimal,
    }

    fn wire(value: rust_decimal::Decimal) -> serde_json::Value {
        serde_json::to_value(Price { value }).unwrap()["value"].clone()
    }

    #[test]
    fn test_money_always_has_two_decimals() {
        assert_eq!(wire(dec!(5)), "5.00");
        assert_eq!(wire(dec!(20.5)), "20.50");
        assert_eq!(wire(dec!(99.99)), "99.99");
        assert_eq!(wire(dec!(0)), "0.00");
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        // valeur relue via f64
        assert_eq!(wire(dec!(33.329999999999998)), "33.33");
    }
}
