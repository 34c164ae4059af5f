use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn get_database_connection(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    connect_and_migrate(options).await
}

/// Connects with `options` and brings the schema up to date.
pub async fn connect_and_migrate(options: ConnectOptions) -> Result<DatabaseConnection> {
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database connection established and migrations applied");
    Ok(db)
}
