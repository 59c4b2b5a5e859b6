use eyre::{Result, eyre};
use tracing::info;

use crate::DbPool;

pub const DEFAULT_TABLE: &str = "appointments";

/// Name of the table holding one booking-lock row per trainer.
pub fn lock_table(table: &str) -> String {
    format!("{}_trainer_locks", table)
}

/// Table names are formatted into SQL, so only plain identifiers are accepted.
pub fn ensure_identifier(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(eyre!("invalid table name {:?}", table));
    }

    Ok(())
}

pub async fn initialize_database(pool: &DbPool, table: &str) -> Result<()> {
    ensure_identifier(table)?;
    info!(table, "Initializing database schema...");

    // Create appointments table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id         TEXT PRIMARY KEY,
            trainer_id TEXT NOT NULL,
            user_id    TEXT NOT NULL,
            starts_at  INTEGER NOT NULL,
            ends_at    INTEGER NOT NULL
        );
        "#
    ))
    .execute(pool)
    .await?;

    // Create trainer lock table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {locks} (
            trainer_id TEXT PRIMARY KEY,
            locked_at  INTEGER NOT NULL
        );
        "#,
        locks = lock_table(table)
    ))
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{table}_trainer_starts_at ON {table}(trainer_id, starts_at);
        "#
    ))
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
