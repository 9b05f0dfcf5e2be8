use sea_orm::{
    sea_query::{Alias, ConditionalStatement, Expr, ExprTrait, Index},
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
};

use crate::error::TestError;

pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    /// Fresh in-memory sqlite connection with no tables.
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self { db })
    }

    /// Connection with the full relief schema created from the entities.
    pub async fn with_relief_tables() -> Result<Self, TestError> {
        let setup = Self::new().await?;
        setup.create_relief_tables().await?;

        Ok(setup)
    }

    pub async fn create_relief_tables(&self) -> Result<(), TestError> {
        let schema = Schema::new(DbBackend::Sqlite);

        let stmts = vec![
            schema.create_table_from_entity(entity::prelude::AffectedRequest),
            schema.create_table_from_entity(entity::prelude::DonatorOnTheWay),
            schema.create_table_from_entity(entity::prelude::LocationUpdate),
            schema.create_table_from_entity(entity::prelude::DonationHistory),
            schema.create_table_from_entity(entity::prelude::DonationRating),
        ];

        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        // Constraints the entity derive cannot express; the production
        // migration creates the same indexes.
        let pair_index = Index::create()
            .name("uq-donator_on_the_way-request_id-donator_id")
            .table(Alias::new("donator_on_the_way"))
            .col(Alias::new("request_id"))
            .col(Alias::new("donator_id"))
            .unique()
            .to_owned();

        self.db.execute(&pair_index).await?;

        let active_session_index = Index::create()
            .name("uq-affected_request-session_id-active")
            .table(Alias::new("affected_request"))
            .col(Alias::new("session_id"))
            .unique()
            .and_where(Expr::col(Alias::new("is_active")).eq(true))
            .to_owned();

        self.db.execute(&active_session_index).await?;

        Ok(())
    }
}

#[macro_export]
macro_rules! test_setup_with_relief_tables {
    () => {{
        TestSetup::with_relief_tables().await
    }};
}
