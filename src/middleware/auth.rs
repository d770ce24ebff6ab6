use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{FutureExt, LocalBoxFuture};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::error::AppError;
use crate::models::users;
use crate::utils::jwt;

/// Structure qui contient les infos de l'utilisateur authentifié
/// Utilisée comme extracteur dans les routes protégées (IsAuthenticated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
}

/// Utilisateur authentifié ET staff (IsAdminUser)
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl AuthUser {
    /// Vérifie le token puis recharge le compte : un user supprimé ou désactivé
    /// perd l'accès immédiatement, et `is_staff` vient de la base, pas du token.
    async fn from_http(req: &HttpRequest) -> Result<Self, AppError> {
        // 1. Clé JWT et connexion BD enregistrées dans l'App
        let settings = req
            .app_data::<web::Data<JwtSettings>>()
            .ok_or_else(|| AppError::Internal("JWT settings are not configured".to_string()))?;
        let db = req
            .app_data::<web::Data<DatabaseConnection>>()
            .ok_or_else(|| AppError::Internal("Database is not configured".to_string()))?;

        // 2. Extraire le header Authorization
        let auth_header = req
            .headers()
            .get("Authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

        // 3. Extraire le token (format: "Bearer <token>")
        let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format (expected: Bearer <token>)".to_string())
        })?;

        // 4. Vérifier le token JWT
        let claims = jwt::verify_token(settings, token).map_err(AppError::Unauthorized)?;

        // 5. Le compte doit toujours exister et être actif
        let user = users::Entity::find_by_id(claims.sub)
            .one(db.get_ref())
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::Unauthorized("User not found or inactive".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            is_staff: user.is_staff,
        })
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        async move {
            let result = AuthUser::from_http(&req).await;
            if let Err(e) = &result {
                tracing::warn!(path = req.path(), error = %e, "rejected request");
            }
            result
        }
        .boxed_local()
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = AuthUser::from_request(req, payload);
        let path = req.path().to_string();
        async move {
            let user = user.await?;
            if !user.is_staff {
                tracing::warn!(path = %path, user_id = user.user_id, "admin route refused");
                return Err(AppError::Forbidden(
                    "You do not have permission to perform this action.".to_string(),
                ));
            }
            Ok(AdminUser(user))
        }
        .boxed_local()
    }
}
