use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::blog_post;
use crate::models::dto::{PostPatch, PostRequest};
use crate::services::delete_or_404;
use crate::services::post_service::PostService;

// Toutes les routes du blog sont réservées au staff (IsAdminUser)

pub async fn list_posts(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let posts = PostService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn create_post(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    body: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let post = PostService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn update_post(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let post = PostService::patch(db.get_ref(), path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn patch_post(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<PostPatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let post = PostService::patch(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    delete_or_404::<blog_post::Entity, _>(db.get_ref(), path.into_inner(), "Post").await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .route("", web::get().to(list_posts))
            .route("", web::post().to(create_post))
            .route("/{id}", web::get().to(get_post))
            .route("/{id}", web::put().to(update_post))
            .route("/{id}", web::patch().to(patch_post))
            .route("/{id}", web::delete().to(delete_post))
    );
}
