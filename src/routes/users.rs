use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{SearchQuery, UserPatch, UserRequest};
use crate::services::user_service::UserService;

/// GET /users?search=... (IsAuthenticated)
pub async fn list_users(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let users = UserService::list(db.get_ref(), query.term()).await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user = UserService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let user = UserService::create(db.get_ref(), body.into_inner(), auth.is_staff).await?;
    Ok(HttpResponse::Created().json(user))
}

/// PUT : username obligatoire, les autres champs vides si absents
pub async fn update_user(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let user = UserService::patch(db.get_ref(), path.into_inner(), body.into_inner().into(), auth.is_staff).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn patch_user(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UserPatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let user = UserService::patch(db.get_ref(), path.into_inner(), body.into_inner(), auth.is_staff).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    UserService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::patch().to(patch_user))
            .route("/{id}", web::delete().to(delete_user))
    );
}
