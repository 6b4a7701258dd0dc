//! Rabbot database tool
//!
//! Loads the configuration, prepares the schedule database (migrations and
//! health check) and reports what it contains.

use tracing::info;

use rabbot::{
    config::Settings,
    database::DatabaseService,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", rabbot::info());

    info!("Connecting to database...");
    let database = DatabaseService::connect(&settings.database).await?;
    database.health_check().await?;

    let stats = database.get_stats().await?;
    info!(stats = %stats, "Schedule database is ready");

    Ok(())
}
