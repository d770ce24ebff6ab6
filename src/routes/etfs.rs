use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{SearchQuery, TickerHoldingPatch, TickerHoldingRequest};
use crate::models::etf;
use crate::models::virtual_trade::InvestmentKind;
use crate::services::find_or_404;
use crate::services::holding_service::HoldingService;

pub async fn list_etfs(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let etfs = HoldingService::list_etfs(db.get_ref(), query.term()).await?;
    Ok(HttpResponse::Ok().json(etfs))
}

pub async fn get_etf(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let holding = find_or_404::<etf::Entity, _>(db.get_ref(), path.into_inner(), "ETF").await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn create_etf(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<TickerHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let holding = HoldingService::create_etf(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(holding))
}

pub async fn update_etf(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TickerHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<etf::Entity, _>(db.get_ref(), path.into_inner(), "ETF").await?;
    body.check()?;
    let holding = HoldingService::patch_etf(db.get_ref(), existing, body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn patch_etf(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TickerHoldingPatch>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<etf::Entity, _>(db.get_ref(), path.into_inner(), "ETF").await?;
    body.check()?;
    let holding = HoldingService::patch_etf(db.get_ref(), existing, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn delete_etf(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    HoldingService::delete(db.get_ref(), InvestmentKind::Etf, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/etfs")
            .route("", web::get().to(list_etfs))
            .route("", web::post().to(create_etf))
            .route("/{id}", web::get().to(get_etf))
            .route("/{id}", web::put().to(update_etf))
            .route("/{id}", web::patch().to(patch_etf))
            .route("/{id}", web::delete().to(delete_etf))
    );
}
