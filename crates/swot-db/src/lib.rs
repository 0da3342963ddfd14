//! Document store adapter for swot: users, topics and quizzes.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Collection, DocumentStore, StoreError};

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Create the database named in `database_url` unless it already exists.
pub async fn ensure_database(database_url: &str) -> anyhow::Result<()> {
    let exists = Postgres::database_exists(database_url)
        .await
        .context("failed to check database")?;
    if !exists {
        tracing::info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    }

    Ok(())
}

/// Run the migrations in this crate's `migrations/` folder.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Create the database if needed, connect and migrate.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgStore> {
    ensure_database(database_url).await?;
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(PgStore::new(pool))
}
