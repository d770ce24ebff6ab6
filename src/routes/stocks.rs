use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{StockFilter, TickerHoldingPatch, TickerHoldingRequest};
use crate::models::stock;
use crate::models::virtual_trade::InvestmentKind;
use crate::services::find_or_404;
use crate::services::holding_service::HoldingService;
use crate::utils::pagination::{self, PageParams};

/// GET /stocks?portfolio=1&ticker_symbol=AAPL&search=AA (pagination standard)
pub async fn list_stocks(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    filter: web::Query<StockFilter>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = pagination::paginate(
        db.get_ref(),
        HoldingService::stocks_query(&filter)?,
        pagination::STANDARD,
        &params,
        req.path(),
        req.query_string(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_stock(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let holding = find_or_404::<stock::Entity, _>(db.get_ref(), path.into_inner(), "Stock").await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn create_stock(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<TickerHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let holding = HoldingService::create_stock(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(holding))
}

pub async fn update_stock(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TickerHoldingRequest>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<stock::Entity, _>(db.get_ref(), path.into_inner(), "Stock").await?;
    body.check()?;
    let holding = HoldingService::patch_stock(db.get_ref(), existing, body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn patch_stock(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TickerHoldingPatch>,
) -> Result<HttpResponse, AppError> {
    let existing = find_or_404::<stock::Entity, _>(db.get_ref(), path.into_inner(), "Stock").await?;
    body.check()?;
    let holding = HoldingService::patch_stock(db.get_ref(), existing, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(holding))
}

pub async fn delete_stock(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    HoldingService::delete(db.get_ref(), InvestmentKind::Stock, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("", web::get().to(list_stocks))
            .route("", web::post().to(create_stock))
            .route("/{id}", web::get().to(get_stock))
            .route("/{id}", web::put().to(update_stock))
            .route("/{id}", web::patch().to(patch_stock))
            .route("/{id}", web::delete().to(delete_stock))
    );
}
