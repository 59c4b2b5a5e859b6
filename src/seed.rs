//! Loads bootstrap appointments from a JSON file, bypassing the scheduling
//! rules. Re-running with the same file rewrites the same rows.

use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use slotkeeper_api::config::parse_log_level;
use slotkeeper_db::{
    create_pool,
    schema::DEFAULT_TABLE,
    seed::{parse_seed, seed_appointments},
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_default()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let seed_path = std::env::var("SEED_JSON").unwrap_or_else(|_| "appointments.json".to_string());
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db.sqlite3".to_string());
    let table = std::env::var("APPOINTMENTS_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());

    let contents = tokio::fs::read_to_string(&seed_path)
        .await
        .wrap_err_with(|| format!("Failed to read seed file {}", seed_path))?;
    let appointments = parse_seed(&contents)?;
    info!(path = %seed_path, records = appointments.len(), "Loaded seed file");

    let db_pool = create_pool(&database_url).await?;
    let written = seed_appointments(&db_pool, &table, &appointments).await?;
    info!(rows = written, "Seeding complete");

    Ok(())
}
