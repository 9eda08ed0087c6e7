//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use drivebox_core::DriveError;

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DriveError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            DriveError::database_with_source(format!("Failed to run migrations: {e}"), e)
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}
