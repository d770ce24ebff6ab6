use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{ProfilePatch, ProfileRequest};
use crate::models::user_profile;
use crate::services::delete_or_404;
use crate::services::profile_service::ProfileService;
use crate::utils::pagination::{self, PageParams};

/// GET /profiles (pagination standard)
pub async fn list_profiles(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = pagination::paginate(
        db.get_ref(),
        ProfileService::list_query(),
        pagination::STANDARD,
        &params,
        req.path(),
        req.query_string(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn create_profile(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let profile = ProfileService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(profile))
}

pub async fn update_profile(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let profile = ProfileService::patch(db.get_ref(), path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn patch_profile(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<ProfilePatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let profile = ProfileService::patch(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn delete_profile(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    delete_or_404::<user_profile::Entity, _>(db.get_ref(), path.into_inner(), "Profile").await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(list_profiles))
            .route("", web::post().to(create_profile))
            .route("/{id}", web::get().to(get_profile))
            .route("/{id}", web::put().to(update_profile))
            .route("/{id}", web::patch().to(patch_profile))
            .route("/{id}", web::delete().to(delete_profile))
    );
}
