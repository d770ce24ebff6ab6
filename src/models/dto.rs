// Data Transfer Objects pour les requêtes API (POST / PUT / PATCH)
//
// Pour chaque ressource:
//   - XxxRequest : corps complet, utilisé par POST et PUT
//   - XxxPatch   : tous les champs optionnels, utilisé par PATCH
// Un PUT est appliqué comme un PATCH où tous les champs sont présents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::virtual_trade::{InvestmentKind, TradeType};
use crate::utils::money;
use crate::utils::validation::{check_money, check_optional_money, collect, finish};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    // Obligatoire à la création, optionnel pour un PUT
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

impl From<UserRequest> for UserPatch {
    fn from(r: UserRequest) -> Self {
        UserPatch {
            username: Some(r.username),
            email: Some(r.email.unwrap_or_default()),
            first_name: Some(r.first_name.unwrap_or_default()),
            last_name: Some(r.last_name.unwrap_or_default()),
            password: r.password,
            is_staff: r.is_staff,
            is_active: r.is_active,
        }
    }
}

/// ?search=... (contient) sur les listes users, stocks, etfs et cryptocurrencies
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> Option<&str> {
        non_empty(&self.search)
    }
}

/// Un paramètre de query vide compte comme absent
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    pub user: i32,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 18, max = 100))]
    pub age: i32,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub origin: String,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
    #[validate(length(max = 100))]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfilePatch {
    pub user: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 18, max = 100))]
    pub age: Option<i32>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub origin: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
    #[validate(length(max = 100))]
    pub profile_picture: Option<String>,
}

impl From<ProfileRequest> for ProfilePatch {
    fn from(r: ProfileRequest) -> Self {
        ProfilePatch {
            user: Some(r.user),
            surname: Some(r.surname),
            address: Some(r.address),
            email: Some(r.email),
            age: Some(r.age),
            bio: Some(r.bio.unwrap_or_default()),
            origin: Some(r.origin),
            phone_number: Some(r.phone_number.unwrap_or_default()),
            profile_picture: r.profile_picture,
        }
    }
}

// ---------------------------------------------------------------------------
// Portfolios
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct PortfolioRequest {
    pub user: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PortfolioPatch {
    pub user: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<PortfolioRequest> for PortfolioPatch {
    fn from(r: PortfolioRequest) -> Self {
        PortfolioPatch {
            user: Some(r.user),
            name: Some(r.name),
            description: Some(r.description.unwrap_or_default()),
        }
    }
}

/// Valeur d'un portfolio, détaillée par type de holding
#[derive(Debug, Serialize, PartialEq)]
pub struct ValuationResponse {
    pub portfolio: i32,
    #[serde(serialize_with = "money::serialize")]
    pub stocks: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub etfs: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub cryptocurrencies: Decimal,
    #[serde(serialize_with = "money::serialize")]
    pub total_value: Decimal,
}

// ---------------------------------------------------------------------------
// Holdings (stocks, etfs, cryptocurrencies)
// ---------------------------------------------------------------------------

/// Corps d'un stock ou d'un ETF (identifiés par ticker_symbol)
#[derive(Debug, Deserialize, Validate)]
pub struct TickerHoldingRequest {
    pub portfolio: i32,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub initial_purchase_price: Decimal,
    pub current_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 10))]
    pub ticker_symbol: String,
}

impl TickerHoldingRequest {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_money(&mut errors, "initial_purchase_price", &self.initial_purchase_price);
        check_money(&mut errors, "current_price", &self.current_price);
        finish(errors)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TickerHoldingPatch {
    pub portfolio: Option<i32>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub initial_purchase_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 10))]
    pub ticker_symbol: Option<String>,
}

impl TickerHoldingPatch {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_optional_money(&mut errors, "initial_purchase_price", self.initial_purchase_price.as_ref());
        check_optional_money(&mut errors, "current_price", self.current_price.as_ref());
        finish(errors)
    }
}

impl From<TickerHoldingRequest> for TickerHoldingPatch {
    fn from(r: TickerHoldingRequest) -> Self {
        TickerHoldingPatch {
            portfolio: Some(r.portfolio),
            quantity: Some(r.quantity),
            initial_purchase_price: Some(r.initial_purchase_price),
            current_price: Some(r.current_price),
            purchase_date: Some(r.purchase_date),
            ticker_symbol: Some(r.ticker_symbol),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CryptoHoldingRequest {
    pub portfolio: i32,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub initial_purchase_price: Decimal,
    pub current_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 50))]
    pub crypto_name: String,
}

impl CryptoHoldingRequest {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_money(&mut errors, "initial_purchase_price", &self.initial_purchase_price);
        check_money(&mut errors, "current_price", &self.current_price);
        finish(errors)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CryptoHoldingPatch {
    pub portfolio: Option<i32>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub initial_purchase_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 50))]
    pub crypto_name: Option<String>,
}

impl CryptoHoldingPatch {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_optional_money(&mut errors, "initial_purchase_price", self.initial_purchase_price.as_ref());
        check_optional_money(&mut errors, "current_price", self.current_price.as_ref());
        finish(errors)
    }
}

impl From<CryptoHoldingRequest> for CryptoHoldingPatch {
    fn from(r: CryptoHoldingRequest) -> Self {
        CryptoHoldingPatch {
            portfolio: Some(r.portfolio),
            quantity: Some(r.quantity),
            initial_purchase_price: Some(r.initial_purchase_price),
            current_price: Some(r.current_price),
            purchase_date: Some(r.purchase_date),
            crypto_name: Some(r.crypto_name),
        }
    }
}

/// Filtres de GET /stocks : ?portfolio= et ?ticker_symbol= (égalité exacte),
/// ?search= (contient, sur ticker_symbol). Les valeurs vides sont ignorées.
#[derive(Debug, Default, Deserialize)]
pub struct StockFilter {
    pub portfolio: Option<String>,
    pub ticker_symbol: Option<String>,
    pub search: Option<String>,
}

impl StockFilter {
    pub fn portfolio(&self) -> Option<&str> {
        non_empty(&self.portfolio)
    }

    pub fn ticker_symbol(&self) -> Option<&str> {
        non_empty(&self.ticker_symbol)
    }

    pub fn search(&self) -> Option<&str> {
        non_empty(&self.search)
    }
}

// ---------------------------------------------------------------------------
// Virtual trades
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct TradeRequest {
    pub user: i32,
    pub investment_kind: InvestmentKind,
    pub investment: i32,
    pub trade_type: TradeType,
    #[validate(range(min = 0))]
    pub trade_quantity: i32,
    pub trade_price: Decimal,
}

impl TradeRequest {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_money(&mut errors, "trade_price", &self.trade_price);
        finish(errors)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TradePatch {
    pub user: Option<i32>,
    pub investment_kind: Option<InvestmentKind>,
    pub investment: Option<i32>,
    pub trade_type: Option<TradeType>,
    #[validate(range(min = 0))]
    pub trade_quantity: Option<i32>,
    pub trade_price: Option<Decimal>,
}

impl TradePatch {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = collect(self.validate());
        check_optional_money(&mut errors, "trade_price", self.trade_price.as_ref());
        finish(errors)
    }
}

impl From<TradeRequest> for TradePatch {
    fn from(r: TradeRequest) -> Self {
        TradePatch {
            user: Some(r.user),
            investment_kind: Some(r.investment_kind),
            investment: Some(r.investment),
            trade_type: Some(r.trade_type),
            trade_quantity: Some(r.trade_quantity),
            trade_price: Some(r.trade_price),
        }
    }
}

// ---------------------------------------------------------------------------
// Blog posts & FAQ
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    pub author: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostPatch {
    pub author: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

impl From<PostRequest> for PostPatch {
    fn from(r: PostRequest) -> Self {
        PostPatch {
            author: Some(r.author),
            title: Some(r.title),
            content: Some(r.content),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FaqRequest {
    #[validate(length(min = 1, max = 300))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct FaqPatch {
    #[validate(length(min = 1, max = 300))]
    pub question: Option<String>,
    #[validate(length(min = 1))]
    pub answer: Option<String>,
}

impl From<FaqRequest> for FaqPatch {
    fn from(r: FaqRequest) -> Self {
        FaqPatch {
            question: Some(r.question),
            answer: Some(r.answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile(age: i32) -> ProfileRequest {
        ProfileRequest {
            user: 1,
            surname: "Doe".into(),
            address: "1 rue de la Paix".into(),
            email: "jane@example.com".into(),
            age,
            bio: None,
            origin: "FR".into(),
            phone_number: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_profile_age_bounds() {
        assert!(profile(17).validate().is_err());
        assert!(profile(18).validate().is_ok());
        assert!(profile(100).validate().is_ok());
        assert!(profile(101).validate().is_err());
    }

    #[test]
    fn test_profile_patch_only_checks_present_fields() {
        assert!(ProfilePatch::default().validate().is_ok());

        let patch = ProfilePatch { age: Some(12), ..Default::default() };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("age"));
    }

    #[test]
    fn test_ticker_holding_rejects_bad_prices() {
        let request = TickerHoldingRequest {
            portfolio: 1,
            quantity: 10,
            initial_purchase_price: dec!(4.999),
            current_price: dec!(-1),
            purchase_date: Utc::now(),
            ticker_symbol: "AAPL".into(),
        };

        let errors = request.check().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("initial_purchase_price"));
        assert!(fields.contains_key("current_price"));
    }

    #[test]
    fn test_ticker_symbol_too_long() {
        let patch = TickerHoldingPatch {
            ticker_symbol: Some("ABCDEFGHIJK".into()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }

    #[test]
    fn test_trade_deserializes_wire_names() {
        let request: TradeRequest = serde_json::from_value(serde_json::json!({
            "user": 1,
            "investment_kind": "etf",
            "investment": 3,
            "trade_type": "SELL",
            "trade_quantity": 2,
            "trade_price": "10.50"
        }))
        .unwrap();

        assert_eq!(request.investment_kind, InvestmentKind::Etf);
        assert_eq!(request.trade_type, TradeType::Sell);
        assert_eq!(request.trade_price, dec!(10.50));
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_put_becomes_full_patch() {
        let patch: PortfolioPatch = PortfolioRequest {
            user: 4,
            name: "Retraite".into(),
            description: None,
        }
        .into();

        assert_eq!(patch.user, Some(4));
        assert_eq!(patch.description.as_deref(), Some(""));
    }
}
