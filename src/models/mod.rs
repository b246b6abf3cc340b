//! # Data Models
//!
//! This module contains all the data models used throughout the Storefront API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod category;
pub mod domain;
pub mod product;
pub mod tenant;

pub use category::Entity as Category;
pub use domain::Entity as Domain;
pub use product::Entity as Product;
pub use tenant::Entity as Tenant;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "storefront".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
