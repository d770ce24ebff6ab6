// Valorisation des holdings d'un portfolio.
//
//   current_value = quantity × current_price
//   total_value   = Σ current_value sur tous les holdings (stocks, etfs, cryptos)
//
// Arithmétique décimale exacte : aucun arrondi, aucun changement d'échelle.

use rust_decimal::Decimal;

use crate::models::{cryptocurrency, etf, stock};

/// Tout ce qui a une quantité et un prix courant
pub trait Holding {
    fn quantity(&self) -> i32;
    fn current_price(&self) -> Decimal;

    fn current_value(&self) -> Decimal {
        current_value(self.quantity(), self.current_price())
    }
}

pub fn current_value(quantity: i32, current_price: Decimal) -> Decimal {
    Decimal::from(quantity) * current_price
}

/// Somme des valeurs courantes ; 0 pour une liste vide
pub fn total_value<'a, H, I>(holdings: I) -> Decimal
where
    H: Holding + 'a,
    I: IntoIterator<Item = &'a H>,
{
    holdings.into_iter().map(Holding::current_value).sum()
}

impl Holding for stock::Model {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn current_price(&self) -> Decimal {
        self.current_price
    }
}

impl Holding for etf::Model {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn current_price(&self) -> Decimal {
        self.current_price
    }
}

impl Holding for cryptocurrency::Model {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn current_price(&self) -> Decimal {
        self.current_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stock(quantity: i32, current_price: Decimal) -> stock::Model {
        stock::Model {
            id: 1,
            portfolio_id: 1,
            quantity,
            initial_purchase_price: current_price,
            current_price,
            purchase_date: Utc::now(),
            ticker_symbol: "AAPL".to_string(),
        }
    }

    #[test]
    fn test_current_value() {
        assert_eq!(current_value(10, dec!(5.00)), dec!(50.00));
        assert_eq!(current_value(0, dec!(123.45)), Decimal::ZERO);
        assert_eq!(stock(3, dec!(0.10)).current_value(), dec!(0.30));
    }

    #[test]
    fn test_total_value_empty_portfolio() {
        let holdings: Vec<stock::Model> = vec![];
        assert_eq!(total_value(&holdings), Decimal::ZERO);
    }

    #[test]
    fn test_total_value() {
        let holdings = vec![stock(10, dec!(5.00)), stock(2, dec!(100.00))];
        assert_eq!(total_value(&holdings), dec!(250.00));
    }

    #[test]
    fn test_no_rounding() {
        // 3 × 33.33 = 99.99, pas 100
        let holdings = vec![stock(3, dec!(33.33))];
        assert_eq!(total_value(&holdings), dec!(99.99));
        assert_eq!(total_value(&holdings).scale(), 2);
    }
}
