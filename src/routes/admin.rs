use actix_web::{delete, patch, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::dto::{FaqPatch, FaqRequest};
use crate::models::faq;
use crate::services::delete_or_404;
use crate::services::faq_service::FaqService;

// Gestion des FAQ réservée au staff ; /faqs reste en lecture seule

#[post("")]
pub async fn create_faq(
    db: web::Data<DatabaseConnection>,
    admin: AdminUser,
    body: web::Json<FaqRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let faq = FaqService::create(db.get_ref(), body.into_inner()).await?;
    tracing::info!(id = faq.id, by = admin.0.user_id, "faq created");
    Ok(HttpResponse::Created().json(faq))
}

#[put("/{id}")]
pub async fn update_faq(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<FaqRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let faq = FaqService::patch(db.get_ref(), path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(faq))
}

#[patch("/{id}")]
pub async fn patch_faq(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<FaqPatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let faq = FaqService::patch(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(faq))
}

#[delete("/{id}")]
pub async fn delete_faq(
    db: web::Data<DatabaseConnection>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    delete_or_404::<faq::Entity, _>(db.get_ref(), path.into_inner(), "FAQ").await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/faqs")
            .service(create_faq)
            .service(update_faq)
            .service(patch_faq)
            .service(delete_faq)
    );
}
