use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::services::faq_service::FaqService;

// Lecture seule, sans authentification (AllowAny).
// La gestion des FAQ passe par /admin/faqs.

#[get("")]
pub async fn list_faqs(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let faqs = FaqService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(faqs))
}

#[get("/{id}")]
pub async fn get_faq(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let faq = FaqService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(faq))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/faqs")
            .service(list_faqs)
            .service(get_faq)
    );
}
