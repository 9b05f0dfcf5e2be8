use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::config::Config;

/// Connects to the configured database and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(&config.database_url).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
