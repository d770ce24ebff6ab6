pub mod faq_service;
pub mod holding_service;
pub mod portfolio_service;
pub mod post_service;
pub mod profile_service;
pub mod trade_service;
pub mod user_service;
pub mod valuation;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use crate::error::AppError;

/// Charge un enregistrement par id, 404 s'il n'existe pas
pub async fn find_or_404<E, C>(db: &C, id: i32, label: &str) -> Result<E::Model, AppError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(label))
}

/// Vérifie qu'une clé étrangère pointe vers un enregistrement existant.
/// Sinon : erreur de validation (400) sur le champ concerné.
pub async fn ensure_exists<E, C>(db: &C, id: i32, field: &'static str) -> Result<(), AppError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    if E::find_by_id(id).one(db).await?.is_none() {
        return Err(AppError::field(
            field,
            "does_not_exist",
            format!("Invalid pk \"{}\" - object does not exist.", id),
        ));
    }
    Ok(())
}

/// Une contrainte UNIQUE violée en base (deux requêtes concurrentes passées
/// toutes les deux par la vérification préalable) devient une erreur 400 sur le champ.
/// `fields` : (colonne, champ JSON, message) ; la colonne est cherchée dans le
/// message de la BD, la première entrée sert par défaut.
pub fn unique_violation(err: DbErr, fields: &[(&str, &'static str, &str)]) -> AppError {
    let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() else {
        return AppError::Database(err);
    };

    let matched = fields
        .iter()
        .find(|(column, _, _)| detail.contains(column))
        .or_else(|| fields.first());

    match matched {
        Some((_, field, message)) => {
            tracing::warn!(field = *field, "unique constraint violated");
            AppError::field(*field, "unique", *message)
        }
        None => AppError::Database(err),
    }
}

/// Supprime par id, 404 si rien n'a été supprimé
pub async fn delete_or_404<E, C>(db: &C, id: i32, label: &str) -> Result<(), AppError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(label));
    }
    tracing::info!(table = %E::default().table_name(), id, "deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::{user_profile, users};
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    const COLUMNS: &[(&str, &str, &str)] = &[("email", "email", "email taken"), ("user_id", "user", "user taken")];

    async fn user(db: &DatabaseConnection, username: &str) -> users::Model {
        users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(String::new()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            password_hash: Set("pbkdf2_sha256$1$salt$hash".to_string()),
            is_staff: Set(false),
            is_active: Set(true),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    fn profile(user_id: i32, email: &str) -> user_profile::ActiveModel {
        user_profile::ActiveModel {
            user_id: Set(user_id),
            surname: Set("Doe".to_string()),
            address: Set("1 Main Street".to_string()),
            email: Set(email.to_string()),
            age: Set(30),
            bio: Set(String::new()),
            origin: Set("France".to_string()),
            phone_number: Set(String::new()),
            profile_picture: Set(None),
            ..Default::default()
        }
    }

    fn field_of(err: AppError) -> String {
        match err {
            AppError::Validation(errors) => errors.field_errors().keys().next().unwrap().to_string(),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unique_violation_names_the_column() {
        let db = test_connection().await;
        let first = user(&db, "first").await;
        let second = user(&db, "second").await;
        profile(first.id, "same@example.com").insert(&db).await.unwrap();

        // insert direct : la vérification du service est contournée, la BD tranche
        let err = profile(second.id, "same@example.com").insert(&db).await.unwrap_err();
        assert_eq!(field_of(unique_violation(err, COLUMNS)), "email");

        let err = profile(first.id, "other@example.com").insert(&db).await.unwrap_err();
        assert_eq!(field_of(unique_violation(err, COLUMNS)), "user");
    }

    #[test]
    fn test_other_db_errors_stay_database_errors() {
        let err = unique_violation(DbErr::Custom("boom".into()), COLUMNS);
        assert!(matches!(err, AppError::Database(_)));
    }
}
