mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{middleware::{Logger, NormalizePath}, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::services::user_service::UserService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portfolio_api=info,actix_web=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    tracing::info!("🔌 Connecting to database...");
    let db = db::establish_connection(&settings)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("✅ Database connected!");

    if settings.auto_migrate {
        db::sync_schema(&db).await.context("Failed to create tables")?;
    }

    if let Some(admin) = &settings.admin {
        UserService::ensure_admin(&db, admin)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create admin account: {}", e))?;
    }

    let db = web::Data::new(db);
    let jwt = web::Data::new(settings.jwt.clone());

    tracing::info!("🚀 Starting server on http://{}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(jwt.clone())
            .configure(routes::configure_routes)
    })
        .bind((settings.host.as_str(), settings.port))?
        .run()
        .await?;

    Ok(())
}
