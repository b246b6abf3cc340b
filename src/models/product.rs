//! Product entity model
//!
//! Products are tenant-scoped: the table exists once per tenant schema and
//! is reached through the search_path set by the tenancy layer. The entity
//! is therefore declared without a schema qualifier.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Tenant-scoped product entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name of the product
    pub name: String,

    /// Optional reference to a shared category; cascade-deleted with it
    pub category_id: Option<i64>,

    /// Price as an exact fixed-point decimal, numeric(10,2)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
