// connexion BD + création des tables

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    Schema,
};

use crate::config::Settings;
use crate::models::{
    blog_post, cryptocurrency, etf, faq, portfolio, stock, user_profile, users, virtual_trade,
};

pub async fn establish_connection(settings: &Settings) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(settings.database_url.clone());
    options
        .max_connections(settings.db_max_connections)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Crée les tables manquantes à partir des entités (CREATE TABLE IF NOT EXISTS).
/// L'ordre suit les clés étrangères : users d'abord, trades à la fin.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, user_profile::Entity).await?;
    create_table(db, portfolio::Entity).await?;
    create_table(db, stock::Entity).await?;
    create_table(db, etf::Entity).await?;
    create_table(db, cryptocurrency::Entity).await?;
    create_table(db, virtual_trade::Entity).await?;
    create_table(db, blog_post::Entity).await?;
    create_table(db, faq::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = entity.table_name(), "table ready");
    Ok(())
}

/// Base SQLite en mémoire avec toutes les tables, pour les tests
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // une seule connexion : chaque connexion SQLite :memory: a sa propre base
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    sync_schema(&db).await.unwrap();
    db
}
