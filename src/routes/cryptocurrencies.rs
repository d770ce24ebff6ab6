use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::cryptocurrency;
use crate::models::dto::{CryptoHoldingPatch, CryptoHoldingRequest, SearchQuery};
use crate::models::virtual_trade::InvestmentKind;
use crate::services::find_or_404;
use crate::services::holding_service::HoldingService;

pub async fn list_cryptocurrencies(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let cryptos = HoldingService::list_cryptos(db.get_ref(), query.term()).await?;
    Ok(HttpResponse::Ok().json(cryptos))
}

pub async fn get_cryptocurrency(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let holding = find_or_404::<cryptocurrency::Entity, _>(db.get_ref(), path.into_inner(), "Cryptocurrency").await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn create_cryptocurrency(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<CryptoHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let holding = HoldingService::create_crypto(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(holding))
}

pub async fn update_cryptocurrency(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<CryptoHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<cryptocurrency::Entity, _>(db.get_ref(), path.into_inner(), "Cryptocurrency").await?;
    body.check()?;
    let holding = HoldingService::patch_crypto(db.get_ref(), existing, body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn patch_cryptocurrency(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<CryptoHoldingPatch>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<cryptocurrency::Entity, _>(db.get_ref(), path.into_inner(), "Cryptocurrency").await?;
    body.check()?;
    let holding = HoldingService::patch_crypto(db.get_ref(), existing, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn delete_cryptocurrency(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    HoldingService::delete(db.get_ref(), InvestmentKind::Cryptocurrency, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cryptocurrencies")
            .route("", web::get().to(list_cryptocurrencies))
            .route("", web::post().to(create_cryptocurrency))
            .route("/{id}", web::get().to(get_cryptocurrency))
            .route("/{id}", web::put().to(update_cryptocurrency))
            .route("/{id}", web::patch().to(patch_cryptocurrency))
            .route("/{id}", web::delete().to(delete_cryptocurrency))
    );
}
