pub use sea_orm_migration::prelude::*;

mod m20260815_000001_affected_request;
mod m20260815_000002_donator_on_the_way;
mod m20260815_000003_location_update;
mod m20260815_000004_donation_history;
mod m20260815_000005_donation_rating;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_affected_request::Migration),
            Box::new(m20260815_000002_donator_on_the_way::Migration),
            Box::new(m20260815_000003_location_update::Migration),
            Box::new(m20260815_000004_donation_history::Migration),
            Box::new(m20260815_000005_donation_rating::Migration),
        ]
    }
}
