// Holdings d'un portfolio : stocks, ETFs et cryptomonnaies.
// Les trois tables partagent les colonnes d'un investissement
// (portfolio, quantity, prix d'achat, prix courant, date d'achat) ;
// stocks et ETFs ont un ticker_symbol, les cryptos un crypto_name.

use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{CryptoHoldingPatch, CryptoHoldingRequest, StockFilter, TickerHoldingPatch, TickerHoldingRequest};
use crate::models::virtual_trade::InvestmentKind;
use crate::models::{cryptocurrency, etf, portfolio, stock};
use crate::services::{delete_or_404, ensure_exists, trade_service::TradeService};

pub struct HoldingService;

impl HoldingService {
    /// GET /stocks : filtres exacts ?portfolio= et ?ticker_symbol=, ?search= sur le ticker
    pub fn stocks_query(filter: &StockFilter) -> Result<Select<stock::Entity>, AppError> {
        let mut query = stock::Entity::find().order_by_asc(stock::Column::Id);
        if let Some(raw) = filter.portfolio() {
            let portfolio_id: i32 = raw.parse().map_err(|_| {
                AppError::field(
                    "portfolio",
                    "invalid_choice",
                    "Select a valid choice. That choice is not one of the available choices.",
                )
            })?;
            query = query.filter(stock::Column::PortfolioId.eq(portfolio_id));
        }
        if let Some(ticker) = filter.ticker_symbol() {
            query = query.filter(stock::Column::TickerSymbol.eq(ticker));
        }
        if let Some(term) = filter.search() {
            query = query.filter(stock::Column::TickerSymbol.contains(term));
        }
        Ok(query)
    }

    /// GET /etfs?search= (contient, sur le ticker)
    pub async fn list_etfs(db: &DatabaseConnection, search: Option<&str>) -> Result<Vec<etf::Model>, AppError> {
        let mut query = etf::Entity::find().order_by_asc(etf::Column::Id);
        if let Some(term) = search {
            query = query.filter(etf::Column::TickerSymbol.contains(term));
        }
        Ok(query.all(db).await?)
    }

    /// GET /cryptocurrencies?search= (contient, sur crypto_name)
    pub async fn list_cryptos(
        db: &DatabaseConnection,
        search: Option<&str>,
    ) -> Result<Vec<cryptocurrency::Model>, AppError> {
        let mut query = cryptocurrency::Entity::find().order_by_asc(cryptocurrency::Column::Id);
        if let Some(term) = search {
            query = query.filter(cryptocurrency::Column::CryptoName.contains(term));
        }
        Ok(query.all(db).await?)
    }

    pub async fn create_stock(
        db: &DatabaseConnection,
        request: TickerHoldingRequest,
    ) -> Result<stock::Model, AppError> {
        ensure_exists::<portfolio::Entity, _>(db, request.portfolio, "portfolio").await?;

        let holding = stock::ActiveModel {
            portfolio_id: Set(request.portfolio),
            quantity: Set(request.quantity),
            initial_purchase_price: Set(request.initial_purchase_price),
            current_price: Set(request.current_price),
            purchase_date: Set(request.purchase_date),
            ticker_symbol: Set(request.ticker_symbol),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(id = holding.id, portfolio = holding.portfolio_id, ticker = %holding.ticker_symbol, "stock added");
        Ok(holding)
    }

    pub async fn patch_stock(
        db: &DatabaseConnection,
        holding: stock::Model,
        patch: TickerHoldingPatch,
    ) -> Result<stock::Model, AppError> {
        if let Some(portfolio_id) = patch.portfolio {
            ensure_exists::<portfolio::Entity, _>(db, portfolio_id, "portfolio").await?;
        }

        let mut active: stock::ActiveModel = holding.into();
        if let Some(v) = patch.portfolio {
            active.portfolio_id = Set(v);
        }
        if let Some(v) = patch.quantity {
            active.quantity = Set(v);
        }
        if let Some(v) = patch.initial_purchase_price {
            active.initial_purchase_price = Set(v);
        }
        if let Some(v) = patch.current_price {
            active.current_price = Set(v);
        }
        if let Some(v) = patch.purchase_date {
            active.purchase_date = Set(v);
        }
        if let Some(v) = patch.ticker_symbol {
            active.ticker_symbol = Set(v);
        }

        Ok(active.update(db).await?)
    }

    pub async fn create_etf(
        db: &DatabaseConnection,
        request: TickerHoldingRequest,
    ) -> Result<etf::Model, AppError> {
        ensure_exists::<portfolio::Entity, _>(db, request.portfolio, "portfolio").await?;

        let holding = etf::ActiveModel {
            portfolio_id: Set(request.portfolio),
            quantity: Set(request.quantity),
            initial_purchase_price: Set(request.initial_purchase_price),
            current_price: Set(request.current_price),
            purchase_date: Set(request.purchase_date),
            ticker_symbol: Set(request.ticker_symbol),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(id = holding.id, portfolio = holding.portfolio_id, ticker = %holding.ticker_symbol, "etf added");
        Ok(holding)
    }

    pub async fn patch_etf(
        db: &DatabaseConnection,
        holding: etf::Model,
        patch: TickerHoldingPatch,
    ) -> Result<etf::Model, AppError> {
        if let Some(portfolio_id) = patch.portfolio {
            ensure_exists::<portfolio::Entity, _>(db, portfolio_id, "portfolio").await?;
        }

        let mut active: etf::ActiveModel = holding.into();
        if let Some(v) = patch.portfolio {
            active.portfolio_id = Set(v);
        }
        if let Some(v) = patch.quantity {
            active.quantity = Set(v);
        }
        if let Some(v) = patch.initial_purchase_price {
            active.initial_purchase_price = Set(v);
        }
        if let Some(v) = patch.current_price {
            active.current_price = Set(v);
        }
        if let Some(v) = patch.purchase_date {
            active.purchase_date = Set(v);
        }
        if let Some(v) = patch.ticker_symbol {
            active.ticker_symbol = Set(v);
        }

        Ok(active.update(db).await?)
    }

    pub async fn create_crypto(
        db: &DatabaseConnection,
        request: CryptoHoldingRequest,
    ) -> Result<cryptocurrency::Model, AppError> {
        ensure_exists::<portfolio::Entity, _>(db, request.portfolio, "portfolio").await?;

        let holding = cryptocurrency::ActiveModel {
            portfolio_id: Set(request.portfolio),
            quantity: Set(request.quantity),
            initial_purchase_price: Set(request.initial_purchase_price),
            current_price: Set(request.current_price),
            purchase_date: Set(request.purchase_date),
            crypto_name: Set(request.crypto_name),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(id = holding.id, portfolio = holding.portfolio_id, name = %holding.crypto_name, "cryptocurrency added");
        Ok(holding)
    }

    pub async fn patch_crypto(
        db: &DatabaseConnection,
        holding: cryptocurrency::Model,
        patch: CryptoHoldingPatch,
    ) -> Result<cryptocurrency::Model, AppError> {
        if let Some(portfolio_id) = patch.portfolio {
            ensure_exists::<portfolio::Entity, _>(db, portfolio_id, "portfolio").await?;
        }

        let mut active: cryptocurrency::ActiveModel = holding.into();
        if let Some(v) = patch.portfolio {
            active.portfolio_id = Set(v);
        }
        if let Some(v) = patch.quantity {
            active.quantity = Set(v);
        }
        if let Some(v) = patch.initial_purchase_price {
            active.initial_purchase_price = Set(v);
        }
        if let Some(v) = patch.current_price {
            active.current_price = Set(v);
        }
        if let Some(v) = patch.purchase_date {
            active.purchase_date = Set(v);
        }
        if let Some(v) = patch.crypto_name {
            active.crypto_name = Set(v);
        }

        Ok(active.update(db).await?)
    }

    /// Supprime un holding et les trades virtuels qui le visent
    pub async fn delete(db: &DatabaseConnection, kind: InvestmentKind, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;

        TradeService::delete_for_holding(&txn, kind, &[id]).await?;
        match kind {
            InvestmentKind::Stock => delete_or_404::<stock::Entity, _>(&txn, id, "Stock").await?,
            InvestmentKind::Etf => delete_or_404::<etf::Entity, _>(&txn, id, "ETF").await?,
            InvestmentKind::Cryptocurrency => {
                delete_or_404::<cryptocurrency::Entity, _>(&txn, id, "Cryptocurrency").await?
            }
        }

        txn.commit().await?;
        Ok(())
    }
}
