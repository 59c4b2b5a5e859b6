use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotkeeper_db::schema::{DEFAULT_TABLE, initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db.sqlite3".to_string());
    let table = std::env::var("APPOINTMENTS_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());

    println!("Opening {}...", database_url);
    let db_pool = slotkeeper_db::create_pool(&database_url).await?;

    println!("Creating table {} and its indexes...", table);
    initialize_database(&db_pool, &table).await?;
    println!("Schema ready.");

    Ok(())
}
