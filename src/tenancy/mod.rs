//! # Schema-based multi-tenancy
//!
//! Each tenant owns a Postgres schema holding its tenant-scoped tables.
//! This module provides the three pieces the rest of the crate builds on:
//!
//! - [`schema`]: schema name derivation/validation and the DDL that
//!   provisions or drops a tenant's schema and tables;
//! - [`scope`]: transactions pinned to a tenant's schema via
//!   `SET LOCAL search_path`;
//! - [`resolver`]: request middleware resolving the active tenant from the
//!   `X-Tenant-Id` header or the request hostname.
//!
//! On SQLite (used by the test suite) there is a single namespace, so
//! schema creation and search_path scoping degrade to no-ops while the
//! table DDL still runs.

pub mod resolver;
pub mod schema;
pub mod scope;

pub use resolver::{TenantScope, tenant_resolver};
pub use schema::{derive_schema_name, validate_schema_name};
pub use scope::{TenantContext, begin_scoped};
