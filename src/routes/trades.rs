use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{TradePatch, TradeRequest};
use crate::models::virtual_trade;
use crate::services::delete_or_404;
use crate::services::trade_service::TradeService;
use crate::utils::pagination::{self, PageParams};

/// GET /trades (pagination large : 1000 par page, max 10000)
pub async fn list_trades(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let query = virtual_trade::Entity::find().order_by_asc(virtual_trade::Column::Id);
    let page = pagination::paginate(
        db.get_ref(),
        query,
        pagination::LARGE,
        &params,
        req.path(),
        req.query_string(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_trade(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let trade = TradeService::get(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trade))
}

pub async fn create_trade(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    body: web::Json<TradeRequest>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let trade = TradeService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(trade))
}

pub async fn update_trade(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TradeRequest>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let trade = TradeService::patch(db.get_ref(), path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(trade))
}

pub async fn patch_trade(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
    body: web::Json<TradePatch>,
) -> Result<HttpResponse, AppError> {
    body.check()?;
    let trade = TradeService::patch(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trade))
}

pub async fn delete_trade(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    delete_or_404::<virtual_trade::Entity, _>(db.get_ref(), path.into_inner(), "Trade").await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trades")
            .route("", web::get().to(list_trades))
            .route("", web::post().to(create_trade))
            .route("/{id}", web::get().to(get_trade))
            .route("/{id}", web::put().to(update_trade))
            .route("/{id}", web::patch().to(patch_trade))
            .route("/{id}", web::delete().to(delete_trade))
    );
}
