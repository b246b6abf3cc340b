//! Category entity model
//!
//! Categories live in the public schema and are shared across tenants.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Shared catalog classification entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name of the category
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
