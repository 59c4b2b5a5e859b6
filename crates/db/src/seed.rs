//! Bulk loading of bootstrap appointments.
//!
//! Seed records bypass every scheduling rule and are upserted by id, so a
//! seed file can be replayed. Never use this path for real bookings.

use std::fmt;

use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use serde::Deserialize;
use slotkeeper_core::models::appointment::Appointment;
use tracing::info;

use crate::{
    DbPool,
    models::DbAppointment,
    schema::{ensure_identifier, initialize_database},
};

/// Identifier as found in seed files, which may use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeedId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedId::Number(n) => write!(f, "{}", n),
            SeedId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecord {
    pub id: SeedId,
    pub trainer_id: SeedId,
    pub user_id: SeedId,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl From<SeedRecord> for Appointment {
    fn from(record: SeedRecord) -> Self {
        Appointment::new(
            record.id.to_string(),
            record.trainer_id.to_string(),
            record.user_id.to_string(),
            record.started_at,
            record.ended_at,
        )
    }
}

/// Parses a JSON array of seed records.
pub fn parse_seed(json: &str) -> Result<Vec<Appointment>> {
    let records: Vec<SeedRecord> =
        serde_json::from_str(json).wrap_err("Invalid seed file")?;

    Ok(records.into_iter().map(Appointment::from).collect())
}

/// Creates the schema if needed and upserts every appointment in one
/// transaction. Returns the number of rows written.
pub async fn seed_appointments(
    pool: &DbPool,
    table: &str,
    appointments: &[Appointment],
) -> Result<u64> {
    ensure_identifier(table)?;
    initialize_database(pool, table).await?;

    let insert = format!(
        r#"
        INSERT OR REPLACE INTO {} (id, trainer_id, user_id, starts_at, ends_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
        table
    );

    let mut tx = pool.begin().await?;
    let mut written = 0;
    for apt in appointments {
        let row = DbAppointment::from(apt);
        written += sqlx::query(&insert)
            .bind(&row.id)
            .bind(&row.trainer_id)
            .bind(&row.user_id)
            .bind(row.starts_at)
            .bind(row.ends_at)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;

    info!(table, records = appointments.len(), "Seeded appointments");
    Ok(written)
}
