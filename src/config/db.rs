//! Database connection and schema migrations for the config store

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

/// A single schema migration, applied exactly once in version order
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "options",
    sql: "CREATE TABLE IF NOT EXISTS options (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
          )",
}];

/// Open (or create) the config database at the given path
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open config database at {:?}", path))
}

/// Open an in-memory database for tests.
///
/// Capped at a single connection: every pooled connection would otherwise
/// get its own empty in-memory database.
pub async fn connect_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new().in_memory(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .context("Failed to open in-memory database")
}

/// Run all pending schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
         )",
    )
    .execute(pool)
    .await
    .context("Failed to initialize migration table")?;

    let applied: Vec<i64> = sqlx::query_scalar("SELECT version FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }

        log::info!("Applying migration {} ({})", migration.version, migration.name);

        let mut tx = pool.begin().await.context("Failed to begin transaction")?;
        sqlx::query(migration.sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Migration {} failed", migration.version))?;
        sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to record migration {}", migration.version))?;
        tx.commit().await.context("Failed to commit migration")?;
    }

    Ok(())
}
