pub use sea_orm_migration::prelude::*;

mod m20260301_120000_create_table_certificate;
mod m20260301_121500_add_index_registration_number;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_120000_create_table_certificate::Migration),
            Box::new(m20260301_121500_add_index_registration_number::Migration),
        ]
    }
}
