pub use sea_orm_migration::prelude::*;

mod m20250810_000000_bootstrap;
mod m20250810_000001_create_accounts;
mod m20250810_000002_create_events;
mod m20250811_000000_seed_accounts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000000_bootstrap::Migration),
            Box::new(m20250810_000001_create_accounts::Migration),
            Box::new(m20250810_000002_create_events::Migration),
            Box::new(m20250811_000000_seed_accounts::Migration),
        ]
    }
}
