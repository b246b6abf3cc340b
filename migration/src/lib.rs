//! Database migrations for the Storefront API.
//!
//! Only the shared (public schema) tables are managed here. Tenant-scoped
//! tables are provisioned per schema when a tenant is created; see the
//! `tenancy` module in the main crate.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_tenants;
mod m2025_06_01_000002_create_domains;
mod m2025_06_01_000003_create_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_tenants::Migration),
            Box::new(m2025_06_01_000002_create_domains::Migration),
            Box::new(m2025_06_01_000003_create_categories::Migration),
        ]
    }
}
