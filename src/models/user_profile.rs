// ============================================================================
// MODÈLE : USER PROFILE
// ============================================================================
//
// Colonnes de la table user_profiles:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - user_id (INTEGER, UNIQUE, NOT NULL, FK vers users) - un profil par user
//   - surname (VARCHAR(100))
//   - address (TEXT)
//   - email (VARCHAR, UNIQUE) - validé à la création
//   - age (INTEGER) - entre 18 et 100 inclus
//   - bio (TEXT, max 500, peut être vide)
//   - origin (VARCHAR(100))
//   - phone_number (VARCHAR(15), peut être vide)
//   - profile_picture (VARCHAR, NULL) - chemin ou URL de l'image
//
// Points d'attention:
//   - ON DELETE CASCADE: si user supprimé, profil supprimé aussi
//   - En JSON, user_id est exposé sous le nom "user"
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    #[serde(rename = "user")]
    pub user_id: i32,

    pub surname: String,

    #[sea_orm(column_type = "Text")]
    pub address: String,

    #[sea_orm(unique)]
    pub email: String,

    pub age: i32,

    #[sea_orm(column_type = "Text")]
    pub bio: String,

    pub origin: String,

    pub phone_number: String,

    pub profile_picture: Option<String>,
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
