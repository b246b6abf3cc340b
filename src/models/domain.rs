//! Domain entity model
//!
//! Maps a request hostname to the tenant that serves it. A tenant may have
//! several hostnames; one of them is flagged as primary.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Domain entity mapping a hostname to a tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    /// Unique identifier for the domain (primary key)
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// Request hostname, unique across all tenants
    pub hostname: String,

    /// Tenant that owns this hostname
    pub tenant_id: Uuid,

    /// Whether this is the tenant's primary hostname
    pub is_primary: bool,

    /// Timestamp when the domain was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
