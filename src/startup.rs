//! Connection bootstrap for embedding applications.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{config::Config, error::Error};

/// Connect to the database and run migrations.
///
/// A failure here is [`Error::ConnectionError`]: the embedding application
/// may keep running in a disconnected state, but every data operation will
/// then fail fast with the same kind.
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await.map_err(Error::ConnectionError)?;

    Migrator::up(&db, None)
        .await
        .map_err(Error::ConnectionError)?;

    tracing::info!("connected to database");

    Ok(db)
}
