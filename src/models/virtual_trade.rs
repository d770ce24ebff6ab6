use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

use crate::utils::money;

/// Type de holding visé par un trade (stocks, etfs ou cryptocurrencies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum InvestmentKind {
    #[sea_orm(string_value = "stock")]
    Stock,
    #[sea_orm(string_value = "etf")]
    Etf,
    #[sea_orm(string_value = "cryptocurrency")]
    Cryptocurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    #[sea_orm(string_value = "BUY")]
    Buy,
    #[sea_orm(string_value = "SELL")]
    Sell,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "virtual_trades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "user")]
    pub user_id: i32,

    // Référence vers un holding : (investment_kind, investment) -> stocks.id, etfs.id ou cryptocurrencies.id
    // Pas de FK SQL possible, la cohérence est vérifiée par TradeService
    pub investment_kind: InvestmentKind,
    #[serde(rename = "investment")]
    pub investment_id: i32,

    pub trade_type: TradeType,
    pub trade_quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[serde(serialize_with = "money::serialize")]
    pub trade_price: Decimal,
    pub trade_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
