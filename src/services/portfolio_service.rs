use chrono::Utc;
use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{PortfolioPatch, PortfolioRequest, ValuationResponse};
use crate::models::{cryptocurrency, etf, portfolio, stock, users};
use crate::services::valuation::total_value;
use crate::services::{delete_or_404, ensure_exists, find_or_404, trade_service::TradeService};

pub struct PortfolioService;

impl PortfolioService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<portfolio::Model>, AppError> {
        Ok(portfolio::Entity::find()
            .order_by_asc(portfolio::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<portfolio::Model, AppError> {
        find_or_404::<portfolio::Entity, _>(db, id, "Portfolio").await
    }

    pub async fn create(
        db: &DatabaseConnection,
        request: PortfolioRequest,
    ) -> Result<portfolio::Model, AppError> {
        ensure_exists::<users::Entity, _>(db, request.user, "user").await?;

        let created = portfolio::ActiveModel {
            user_id: Set(request.user),
            name: Set(request.name),
            description: Set(request.description.unwrap_or_default()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(id = created.id, user_id = created.user_id, "portfolio created");
        Ok(created)
    }

    pub async fn patch(
        db: &DatabaseConnection,
        id: i32,
        patch: PortfolioPatch,
    ) -> Result<portfolio::Model, AppError> {
        let existing = Self::get(db, id).await?;
        if let Some(user) = patch.user {
            ensure_exists::<users::Entity, _>(db, user, "user").await?;
        }

        let mut active: portfolio::ActiveModel = existing.into();
        if let Some(user) = patch.user {
            active.user_id = Set(user);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }

        Ok(active.update(db).await?)
    }

    /// Les holdings partent en cascade, leurs trades sont supprimés ici
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;
        TradeService::delete_for_portfolios(&txn, &[id]).await?;
        delete_or_404::<portfolio::Entity, _>(&txn, id, "Portfolio").await?;
        txn.commit().await?;
        Ok(())
    }

    /// Valeur courante du portfolio, détaillée par type de holding
    pub async fn valuation(db: &DatabaseConnection, id: i32) -> Result<ValuationResponse, AppError> {
        let portfolio = Self::get(db, id).await?;

        let stocks = portfolio.find_related(stock::Entity).all(db).await?;
        let etfs = portfolio.find_related(etf::Entity).all(db).await?;
        let cryptos = portfolio.find_related(cryptocurrency::Entity).all(db).await?;

        let stocks_value = total_value(&stocks);
        let etfs_value = total_value(&etfs);
        let cryptos_value = total_value(&cryptos);

        Ok(ValuationResponse {
            portfolio: portfolio.id,
            stocks: stocks_value,
            etfs: etfs_value,
            cryptocurrencies: cryptos_value,
            total_value: stocks_value + etfs_value + cryptos_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::dto::{CryptoHoldingRequest, TickerHoldingRequest, UserRequest};
    use crate::services::holding_service::HoldingService;
    use crate::services::user_service::UserService;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn setup(db: &DatabaseConnection) -> portfolio::Model {
        let user = UserService::create(
            db,
            UserRequest {
                username: "investor".into(),
                email: None,
                first_name: None,
                last_name: None,
                password: Some("password123".into()),
                is_staff: None,
                is_active: None,
            },
            false,
        )
        .await
        .unwrap();

        PortfolioService::create(
            db,
            PortfolioRequest { user: user.id, name: "Main".into(), description: None },
        )
        .await
        .unwrap()
    }

    fn ticker(portfolio: i32, symbol: &str, quantity: i32, price: Decimal) -> TickerHoldingRequest {
        TickerHoldingRequest {
            portfolio,
            quantity,
            initial_purchase_price: price,
            current_price: price,
            purchase_date: Utc::now(),
            ticker_symbol: symbol.into(),
        }
    }

    #[actix_web::test]
    async fn test_empty_portfolio_is_worth_zero() {
        let db = test_connection().await;
        let portfolio = setup(&db).await;

        let valuation = PortfolioService::valuation(&db, portfolio.id).await.unwrap();
        assert_eq!(valuation.total_value, Decimal::ZERO);
    }

    #[actix_web::test]
    async fn test_valuation_sums_every_kind() {
        let db = test_connection().await;
        let portfolio = setup(&db).await;

        HoldingService::create_stock(&db, ticker(portfolio.id, "AAPL", 10, dec!(5.00))).await.unwrap();
        HoldingService::create_etf(&db, ticker(portfolio.id, "VTI", 2, dec!(100.00))).await.unwrap();
        HoldingService::create_crypto(
            &db,
            CryptoHoldingRequest {
                portfolio: portfolio.id,
                quantity: 1,
                initial_purchase_price: dec!(20.50),
                current_price: dec!(20.50),
                purchase_date: Utc::now(),
                crypto_name: "Bitcoin".into(),
            },
        )
        .await
        .unwrap();

        let valuation = PortfolioService::valuation(&db, portfolio.id).await.unwrap();
        assert_eq!(valuation.stocks, dec!(50));
        assert_eq!(valuation.etfs, dec!(200));
        assert_eq!(valuation.cryptocurrencies, dec!(20.5));
        assert_eq!(valuation.total_value, dec!(270.5));
    }

    #[actix_web::test]
    async fn test_unknown_portfolio() {
        let db = test_connection().await;
        let err = PortfolioService::valuation(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_create_with_unknown_user() {
        let db = test_connection().await;
        let err = PortfolioService::create(
            &db,
            PortfolioRequest { user: 99, name: "Ghost".into(), description: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
