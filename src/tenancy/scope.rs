//! Tenant-pinned database transactions.
//!
//! All tenant-scoped queries run inside a transaction whose search_path is
//! set to the tenant's schema (with `public` kept reachable for the shared
//! tables). `SET LOCAL` keeps the setting transaction-local, so pooled
//! connections never leak a schema into another request.

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr, Statement,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tenant a request operates on, resolved by the middleware in
/// [`super::resolver`]. The schema name is validated at tenant creation,
/// so it is safe to splice into `SET LOCAL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub schema_name: String,
}

/// Begin a transaction scoped to the tenant's schema.
///
/// On SQLite there is a single namespace and the search_path statement is
/// skipped; queries address the shared tables directly.
pub async fn begin_scoped(
    db: &DatabaseConnection,
    ctx: &TenantContext,
) -> Result<DatabaseTransaction, DbErr> {
    let txn = db.begin().await?;

    if txn.get_database_backend() == DatabaseBackend::Postgres {
        txn.execute(Statement::from_string(
            DatabaseBackend::Postgres,
            format!(
                "SET LOCAL search_path TO \"{}\", public",
                ctx.schema_name
            ),
        ))
        .await?;
    }

    Ok(txn)
}
