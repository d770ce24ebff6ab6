// Règles de validation partagées que le derive de validator ne couvre pas
// (montants Decimal, fusion des erreurs).

use rust_decimal::Decimal;
use validator::ValidationErrors;

use crate::error::field_error;

/// NUMERIC(10, 2) : au plus 8 chiffres avant la virgule
const MAX_DIGITS: u32 = 10;
const DECIMAL_PLACES: u32 = 2;

/// Vérifie un montant : >= 0, au plus 2 décimales, au plus 10 chiffres au total
pub fn check_money(errors: &mut ValidationErrors, field: &'static str, value: &Decimal) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.add(field, field_error("min_value", "Ensure this value is greater than or equal to 0."));
        return;
    }

    let normalized = value.normalize();
    if normalized.scale() > DECIMAL_PLACES {
        errors.add(
            field,
            field_error("max_decimal_places", format!("Ensure that there are no more than {} decimal places.", DECIMAL_PLACES)),
        );
        return;
    }

    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if integer_digits > MAX_DIGITS - DECIMAL_PLACES {
        errors.add(
            field,
            field_error("max_whole_digits", format!("Ensure that there are no more than {} digits before the decimal point.", MAX_DIGITS - DECIMAL_PLACES)),
        );
    }
}

pub fn check_optional_money(errors: &mut ValidationErrors, field: &'static str, value: Option<&Decimal>) {
    if let Some(value) = value {
        check_money(errors, field, value);
    }
}

/// Récupère les erreurs du derive pour pouvoir en ajouter d'autres
pub fn collect(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_else(ValidationErrors::new)
}

pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money_errors(value: Decimal) -> Vec<String> {
        let mut errors = ValidationErrors::new();
        check_money(&mut errors, "price", &value);
        errors
            .field_errors()
            .get("price")
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_amounts() {
        assert!(money_errors(dec!(0)).is_empty());
        assert!(money_errors(dec!(5.00)).is_empty());
        assert!(money_errors(dec!(99999999.99)).is_empty());
        // 1.500 se normalise en 1.5
        assert!(money_errors(dec!(1.500)).is_empty());
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(money_errors(dec!(-0.01)), vec!["min_value"]);
    }

    #[test]
    fn test_too_many_decimal_places() {
        assert_eq!(money_errors(dec!(1.234)), vec!["max_decimal_places"]);
    }

    #[test]
    fn test_too_many_digits() {
        assert_eq!(money_errors(dec!(100000000)), vec!["max_whole_digits"]);
    }

    #[test]
    fn test_finish() {
        assert!(finish(ValidationErrors::new()).is_ok());

        let mut errors = ValidationErrors::new();
        check_money(&mut errors, "price", &dec!(-1));
        assert!(finish(errors).is_err());
    }
}
