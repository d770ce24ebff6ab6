use chrono::Utc;
use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{TradePatch, TradeRequest};
use crate::models::virtual_trade::{self, InvestmentKind};
use crate::models::{cryptocurrency, etf, stock, users};
use crate::services::{ensure_exists, find_or_404};

pub struct TradeService;

impl TradeService {
    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<virtual_trade::Model, AppError> {
        find_or_404::<virtual_trade::Entity, _>(db, id, "Trade").await
    }

    /// Enregistre un trade virtuel (BUY ou SELL) sur un holding existant
    pub async fn create(
        db: &DatabaseConnection,
        request: TradeRequest,
    ) -> Result<virtual_trade::Model, AppError> {
        ensure_exists::<users::Entity, _>(db, request.user, "user").await?;
        Self::ensure_investment_exists(db, request.investment_kind, request.investment).await?;

        let new_trade = virtual_trade::ActiveModel {
            user_id: Set(request.user),
            investment_kind: Set(request.investment_kind),
            investment_id: Set(request.investment),
            trade_type: Set(request.trade_type),
            trade_quantity: Set(request.trade_quantity),
            trade_price: Set(request.trade_price),
            trade_date: Set(Utc::now()),
            ..Default::default()
        };

        let trade = new_trade.insert(db).await?;
        tracing::info!(
            trade_id = trade.id,
            user_id = trade.user_id,
            kind = ?trade.investment_kind,
            investment = trade.investment_id,
            "virtual trade recorded"
        );
        Ok(trade)
    }

    pub async fn patch(
        db: &DatabaseConnection,
        id: i32,
        patch: TradePatch,
    ) -> Result<virtual_trade::Model, AppError> {
        let trade = Self::get(db, id).await?;

        if let Some(user) = patch.user {
            ensure_exists::<users::Entity, _>(db, user, "user").await?;
        }
        // Le couple (kind, id) est vérifié avec les valeurs finales
        if patch.investment_kind.is_some() || patch.investment.is_some() {
            let kind = patch.investment_kind.unwrap_or(trade.investment_kind);
            let investment = patch.investment.unwrap_or(trade.investment_id);
            Self::ensure_investment_exists(db, kind, investment).await?;
        }

        let mut active: virtual_trade::ActiveModel = trade.into();
        if let Some(user) = patch.user {
            active.user_id = Set(user);
        }
        if let Some(kind) = patch.investment_kind {
            active.investment_kind = Set(kind);
        }
        if let Some(investment) = patch.investment {
            active.investment_id = Set(investment);
        }
        if let Some(trade_type) = patch.trade_type {
            active.trade_type = Set(trade_type);
        }
        if let Some(quantity) = patch.trade_quantity {
            active.trade_quantity = Set(quantity);
        }
        if let Some(price) = patch.trade_price {
            active.trade_price = Set(price);
        }

        Ok(active.update(db).await?)
    }

    /// 400 sur le champ "investment" si le holding visé n'existe pas
    pub async fn ensure_investment_exists(
        db: &DatabaseConnection,
        kind: InvestmentKind,
        id: i32,
    ) -> Result<(), AppError> {
        match kind {
            InvestmentKind::Stock => ensure_exists::<stock::Entity, _>(db, id, "investment").await,
            InvestmentKind::Etf => ensure_exists::<etf::Entity, _>(db, id, "investment").await,
            InvestmentKind::Cryptocurrency => {
                ensure_exists::<cryptocurrency::Entity, _>(db, id, "investment").await
            }
        }
    }

    /// Supprime les trades qui visent un holding (appelé avant sa suppression)
    pub async fn delete_for_holding<C: ConnectionTrait>(
        db: &C,
        kind: InvestmentKind,
        ids: &[i32],
    ) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = virtual_trade::Entity::delete_many()
            .filter(virtual_trade::Column::InvestmentKind.eq(kind))
            .filter(virtual_trade::Column::InvestmentId.is_in(ids.to_vec()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Supprime les trades qui visent un holding de l'un de ces portfolios
    pub async fn delete_for_portfolios<C: ConnectionTrait>(
        db: &C,
        portfolio_ids: &[i32],
    ) -> Result<(), DbErr> {
        if portfolio_ids.is_empty() {
            return Ok(());
        }

        let stock_ids: Vec<i32> = stock::Entity::find()
            .filter(stock::Column::PortfolioId.is_in(portfolio_ids.to_vec()))
            .all(db)
            .await?
            .into_iter()
            .map(|h| h.id)
            .collect();
        let etf_ids: Vec<i32> = etf::Entity::find()
            .filter(etf::Column::PortfolioId.is_in(portfolio_ids.to_vec()))
            .all(db)
            .await?
            .into_iter()
            .map(|h| h.id)
            .collect();
        let crypto_ids: Vec<i32> = cryptocurrency::Entity::find()
            .filter(cryptocurrency::Column::PortfolioId.is_in(portfolio_ids.to_vec()))
            .all(db)
            .await?
            .into_iter()
            .map(|h| h.id)
            .collect();

        let removed = Self::delete_for_holding(db, InvestmentKind::Stock, &stock_ids).await?
            + Self::delete_for_holding(db, InvestmentKind::Etf, &etf_ids).await?
            + Self::delete_for_holding(db, InvestmentKind::Cryptocurrency, &crypto_ids).await?;

        if removed > 0 {
            tracing::info!(removed, "trades removed with their holdings");
        }
        Ok(())
    }
}
