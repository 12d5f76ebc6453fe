//! Run storefront database migrations.

use std::path::Path;

use tracing::info;

use loomwear_storefront::db;

/// Location of the migration files, relative to the workspace root.
const MIGRATIONS_DIR: &str = "crates/storefront/migrations";

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the migrations
/// directory cannot be read, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let migrator = sqlx::migrate::Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    migrator.run(&pool).await?;

    info!("Migrations applied");
    Ok(())
}
