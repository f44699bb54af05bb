use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::error::TestError;

/// One isolated in-memory database with the full housing schema applied.
pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    /// Connect to a fresh `sqlite::memory:` database and run all
    /// migrations.
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Migrator::up(&db, None).await?;

        Ok(TestSetup { db })
    }
}
