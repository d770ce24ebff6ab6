use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{PortfolioPatch, PortfolioRequest};
use crate::services::portfolio_service::PortfolioService;

pub async fn list_portfolios(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    let portfolios = PortfolioService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(portfolios))
}

pub async fn get_portfolio(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let portfolio = PortfolioService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(portfolio))
}

pub async fn create_portfolio(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<PortfolioRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let portfolio = PortfolioService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(portfolio))
}

pub async fn update_portfolio(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<PortfolioRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let portfolio = PortfolioService::patch(db.get_ref(), path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(portfolio))
}

pub async fn patch_portfolio(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<PortfolioPatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let portfolio = PortfolioService::patch(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(portfolio))
}

pub async fn delete_portfolio(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    PortfolioService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /portfolios/{id}/valuation - valeur courante (quantity × current_price)
pub async fn get_valuation(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let valuation = PortfolioService::valuation(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(valuation))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/portfolios")
            .route("", web::get().to(list_portfolios))
            .route("", web::post().to(create_portfolio))
            .route("/{id}", web::get().to(get_portfolio))
            .route("/{id}", web::put().to(update_portfolio))
            .route("/{id}", web::patch().to(patch_portfolio))
            .route("/{id}", web::delete().to(delete_portfolio))
            .route("/{id}/valuation", web::get().to(get_valuation))
    );
}
