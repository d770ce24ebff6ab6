use chrono::Utc;
use sea_orm::*;
use sea_orm::sea_query::Condition;

use crate::config::AdminBootstrap;
use crate::error::AppError;
use crate::models::dto::{UserPatch, UserRequest};
use crate::models::users;
use crate::services::{delete_or_404, find_or_404, trade_service::TradeService, unique_violation};

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const UNIQUE_COLUMNS: &[(&str, &str, &str)] = &[("username", "username", USERNAME_TAKEN)];
use crate::utils::password;

pub struct UserService;

impl UserService {
    /// Liste des users, les plus récents d'abord.
    /// `search` filtre sur username, email, prénom et nom (contient).
    pub async fn list(
        db: &DatabaseConnection,
        search: Option<&str>,
    ) -> Result<Vec<users::Model>, AppError> {
        let mut query = users::Entity::find()
            .order_by_desc(users::Column::DateJoined)
            .order_by_desc(users::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(users::Column::Username.contains(term))
                    .add(users::Column::Email.contains(term))
                    .add(users::Column::FirstName.contains(term))
                    .add(users::Column::LastName.contains(term)),
            );
        }

        Ok(query.all(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<users::Model, AppError> {
        find_or_404::<users::Entity, _>(db, id, "User").await
    }

    /// Crée un compte. `is_staff` n'est pris en compte que si l'appelant est staff.
    pub async fn create(
        db: &DatabaseConnection,
        request: UserRequest,
        caller_is_staff: bool,
    ) -> Result<users::Model, AppError> {
        let Some(raw_password) = request.password.as_deref() else {
            return Err(AppError::field("password", "required", "This field is required."));
        };

        Self::ensure_username_free(db, &request.username, None).await?;

        let new_user = users::ActiveModel {
            username: Set(request.username.clone()),
            email: Set(request.email.clone().unwrap_or_default()),
            first_name: Set(request.first_name.clone().unwrap_or_default()),
            last_name: Set(request.last_name.clone().unwrap_or_default()),
            password_hash: Set(password::hash_password(raw_password).map_err(AppError::Internal)?),
            is_staff: Set(caller_is_staff && request.is_staff.unwrap_or(false)),
            is_active: Set(request.is_active.unwrap_or(true)),
            date_joined: Set(Utc::now()),
            ..Default::default()
        };

        let user = new_user
            .insert(db)
            .await
            .map_err(|e| unique_violation(e, UNIQUE_COLUMNS))?;
        tracing::info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Mise à jour partielle (PATCH) ; un PUT arrive ici avec tous les champs
    pub async fn patch(
        db: &DatabaseConnection,
        id: i32,
        patch: UserPatch,
        caller_is_staff: bool,
    ) -> Result<users::Model, AppError> {
        let user = Self::get(db, id).await?;

        if let Some(username) = &patch.username {
            Self::ensure_username_free(db, username, Some(id)).await?;
        }

        let mut active: users::ActiveModel = user.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(first_name) = patch.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(raw_password) = patch.password {
            active.password_hash = Set(password::hash_password(&raw_password).map_err(AppError::Internal)?);
        }
        if caller_is_staff {
            if let Some(is_staff) = patch.is_staff {
                active.is_staff = Set(is_staff);
            }
            if let Some(is_active) = patch.is_active {
                active.is_active = Set(is_active);
            }
        }

        active
            .update(db)
            .await
            .map_err(|e| unique_violation(e, UNIQUE_COLUMNS))
    }

    /// Supprime le user ; ses profils, portfolios, holdings, posts et trades
    /// partent en cascade. Les trades d'autres users sur ses holdings aussi.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;

        let portfolio_ids: Vec<i32> = crate::models::portfolio::Entity::find()
            .filter(crate::models::portfolio::Column::UserId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        TradeService::delete_for_portfolios(&txn, &portfolio_ids).await?;

        delete_or_404::<users::Entity, _>(&txn, id, "User").await?;
        txn.commit().await?;
        Ok(())
    }

    /// Vérifie username + mot de passe pour le login
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        raw_password: &str,
    ) -> Result<users::Model, AppError> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or_else(invalid)?;

        if !user.is_active {
            return Err(invalid());
        }

        let is_valid = password::verify_password(raw_password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;
        if !is_valid {
            return Err(invalid());
        }

        Ok(user)
    }

    pub async fn change_password(
        db: &DatabaseConnection,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = Self::get(db, user_id).await?;

        let is_valid = password::verify_password(current_password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;
        if !is_valid {
            return Err(AppError::Unauthorized("Current password is incorrect".to_string()));
        }

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(password::hash_password(new_password).map_err(AppError::Internal)?);
        active.update(db).await?;
        Ok(())
    }

    /// Crée le compte staff défini par ADMIN_USERNAME / ADMIN_PASSWORD s'il n'existe pas
    pub async fn ensure_admin(db: &DatabaseConnection, admin: &AdminBootstrap) -> Result<(), AppError> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(&admin.username))
            .one(db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let request = UserRequest {
            username: admin.username.clone(),
            email: None,
            first_name: None,
            last_name: None,
            password: Some(admin.password.clone()),
            is_staff: Some(true),
            is_active: Some(true),
        };
        Self::create(db, request, true).await?;
        tracing::info!(username = %admin.username, "bootstrap admin created");
        Ok(())
    }

    async fn ensure_username_free(
        db: &DatabaseConnection,
        username: &str,
        except_id: Option<i32>,
    ) -> Result<(), AppError> {
        let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
        if let Some(id) = except_id {
            query = query.filter(users::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            return Err(AppError::field("username", "unique", USERNAME_TAKEN));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;

    fn request(username: &str, is_staff: bool) -> UserRequest {
        UserRequest {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            first_name: None,
            last_name: None,
            password: Some("password123".to_string()),
            is_staff: Some(is_staff),
            is_active: None,
        }
    }

    #[actix_web::test]
    async fn test_create_and_authenticate() {
        let db = test_connection().await;
        let user = UserService::create(&db, request("alice", false), false).await.unwrap();

        assert_ne!(user.password_hash, "password123");
        let logged = UserService::authenticate(&db, "alice", "password123").await.unwrap();
        assert_eq!(logged.id, user.id);
        assert!(UserService::authenticate(&db, "alice", "nope").await.is_err());
    }

    #[actix_web::test]
    async fn test_non_staff_cannot_grant_staff() {
        let db = test_connection().await;
        let user = UserService::create(&db, request("mallory", true), false).await.unwrap();
        assert!(!user.is_staff);

        let admin = UserService::create(&db, request("root", true), true).await.unwrap();
        assert!(admin.is_staff);
    }

    #[actix_web::test]
    async fn test_duplicate_username_rejected() {
        let db = test_connection().await;
        UserService::create(&db, request("bob", false), false).await.unwrap();

        let err = UserService::create(&db, request("bob", false), false).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[actix_web::test]
    async fn test_search() {
        let db = test_connection().await;
        UserService::create(&db, request("alice", false), false).await.unwrap();
        UserService::create(&db, request("bob", false), false).await.unwrap();

        let found = UserService::list(&db, Some("ali")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "alice");
        assert_eq!(UserService::list(&db, None).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_ensure_admin_is_idempotent() {
        let db = test_connection().await;
        let admin = AdminBootstrap { username: "admin".into(), password: "admin-password".into() };

        UserService::ensure_admin(&db, &admin).await.unwrap();
        UserService::ensure_admin(&db, &admin).await.unwrap();

        let users = UserService::list(&db, None).await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].is_staff);
    }
}
