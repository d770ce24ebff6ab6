use actix_web::{post, get, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::config::JwtSettings;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UserRequest};
use crate::models::users;
use crate::services::user_service::UserService;
use crate::utils::jwt;

fn issue_token(settings: &JwtSettings, user: &users::Model) -> Result<AuthResponse, AppError> {
    let token = jwt::generate_token(settings, user.id, &user.username, user.is_staff)
        .map_err(AppError::Internal)?;

    Ok(AuthResponse {
        token,
        user_id: user.id,
        username: user.username.clone(),
        is_staff: user.is_staff,
    })
}

/// POST /auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let body = body.into_inner();

    let request = UserRequest {
        username: body.username,
        email: body.email,
        first_name: None,
        last_name: None,
        password: Some(body.password),
        is_staff: None,
        is_active: None,
    };
    let user = UserService::create(db.get_ref(), request, false).await?;

    Ok(HttpResponse::Created().json(issue_token(&jwt_settings, &user)?))
}

/// POST /auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let user = UserService::authenticate(db.get_ref(), &body.username, &body.password).await?;
    Ok(HttpResponse::Ok().json(issue_token(&jwt_settings, &user)?))
}

/// GET /auth/me - Vérifier le token (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(auth_user)
}

/// POST /auth/change-password - Changer son mot de passe (PROTÉGÉE)
#[post("/change-password")]
pub async fn change_password(
    auth_user: AuthUser,
    body: web::Json<ChangePasswordRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    UserService::change_password(
        db.get_ref(),
        auth_user.user_id,
        &body.current_password,
        &body.new_password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Password changed successfully"
    })))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me)
            .service(change_password)
    );
}
