use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{ProfilePatch, ProfileRequest};
use crate::models::{user_profile, users};
use crate::services::{ensure_exists, find_or_404, unique_violation};

const EMAIL_TAKEN: &str = "user profile with this email already exists.";
const USER_TAKEN: &str = "user profile with this user already exists.";
const UNIQUE_COLUMNS: &[(&str, &str, &str)] = &[("email", "email", EMAIL_TAKEN), ("user_id", "user", USER_TAKEN)];

pub struct ProfileService;

impl ProfileService {
    /// Requête de base du listing, triée par user
    pub fn list_query() -> Select<user_profile::Entity> {
        user_profile::Entity::find()
            .order_by_asc(user_profile::Column::UserId)
            .order_by_asc(user_profile::Column::Id)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<user_profile::Model, AppError> {
        find_or_404::<user_profile::Entity, _>(db, id, "Profile").await
    }

    pub async fn create(
        db: &DatabaseConnection,
        request: ProfileRequest,
    ) -> Result<user_profile::Model, AppError> {
        ensure_exists::<users::Entity, _>(db, request.user, "user").await?;
        Self::ensure_user_free(db, request.user, None).await?;
        Self::ensure_email_free(db, &request.email, None).await?;

        let profile = user_profile::ActiveModel {
            user_id: Set(request.user),
            surname: Set(request.surname),
            address: Set(request.address),
            email: Set(request.email),
            age: Set(request.age),
            bio: Set(request.bio.unwrap_or_default()),
            origin: Set(request.origin),
            phone_number: Set(request.phone_number.unwrap_or_default()),
            profile_picture: Set(request.profile_picture),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| unique_violation(e, UNIQUE_COLUMNS))?;

        tracing::info!(id = profile.id, user_id = profile.user_id, "profile created");
        Ok(profile)
    }

    pub async fn patch(
        db: &DatabaseConnection,
        id: i32,
        patch: ProfilePatch,
    ) -> Result<user_profile::Model, AppError> {
        let profile = Self::get(db, id).await?;

        if let Some(user) = patch.user {
            ensure_exists::<users::Entity, _>(db, user, "user").await?;
            Self::ensure_user_free(db, user, Some(id)).await?;
        }
        if let Some(email) = &patch.email {
            Self::ensure_email_free(db, email, Some(id)).await?;
        }

        let mut active: user_profile::ActiveModel = profile.into();
        if let Some(v) = patch.user {
            active.user_id = Set(v);
        }
        if let Some(v) = patch.surname {
            active.surname = Set(v);
        }
        if let Some(v) = patch.address {
            active.address = Set(v);
        }
        if let Some(v) = patch.email {
            active.email = Set(v);
        }
        if let Some(v) = patch.age {
            active.age = Set(v);
        }
        if let Some(v) = patch.bio {
            active.bio = Set(v);
        }
        if let Some(v) = patch.origin {
            active.origin = Set(v);
        }
        if let Some(v) = patch.phone_number {
            active.phone_number = Set(v);
        }
        if let Some(v) = patch.profile_picture {
            active.profile_picture = Set(Some(v));
        }

        active
            .update(db)
            .await
            .map_err(|e| unique_violation(e, UNIQUE_COLUMNS))
    }

    /// Un email ne peut appartenir qu'à un seul profil
    async fn ensure_email_free(
        db: &DatabaseConnection,
        email: &str,
        except_id: Option<i32>,
    ) -> Result<(), AppError> {
        let mut query = user_profile::Entity::find().filter(user_profile::Column::Email.eq(email));
        if let Some(id) = except_id {
            query = query.filter(user_profile::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            tracing::warn!(email, "profile email already used");
            return Err(AppError::field("email", "unique", EMAIL_TAKEN));
        }
        Ok(())
    }

    /// Un seul profil par user (OneToOne)
    async fn ensure_user_free(
        db: &DatabaseConnection,
        user_id: i32,
        except_id: Option<i32>,
    ) -> Result<(), AppError> {
        let mut query = user_profile::Entity::find().filter(user_profile::Column::UserId.eq(user_id));
        if let Some(id) = except_id {
            query = query.filter(user_profile::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            return Err(AppError::field("user", "unique", USER_TAKEN));
        }
        Ok(())
    }
}
