//! Migrator for the drawing store schema.
//! Every migration is written with `if_not_exists` so re-running is harmless.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_drawing;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_drawing::Migration)]
    }
}
