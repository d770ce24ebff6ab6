use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "user")]
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
}

// Un portfolio a plusieurs holdings, un par type d'investissement
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,

    #[sea_orm(has_many = "super::etf::Entity")]
    Etf,

    #[sea_orm(has_many = "super::cryptocurrency::Entity")]
    Cryptocurrency,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl Related<super::etf::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Etf.def()
    }
}

impl Related<super::cryptocurrency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cryptocurrency.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
