//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for database entities, providing a clean API for data access with tenant-aware methods.

pub mod category;
pub mod domain;
pub mod product;
pub mod tenant;

pub use category::CategoryRepository;
pub use domain::{CreateDomainRequest, DomainRepository};
pub use product::{CreateProductRequest, ProductRepository, UpdateProductRequest};
pub use tenant::{CreateTenantRequest, TenantRepository};
