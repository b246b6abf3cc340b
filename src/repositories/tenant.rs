//! # Tenant Repository
//!
//! This module contains the repository implementation for Tenant entities.
//! Creating a tenant provisions its schema and tenant-scoped tables in the
//! same transaction as the registry row; deleting a tenant drops them.

use crate::error::RepositoryError;
use crate::models::tenant::{
    ActiveModel as TenantActiveModel, Entity as Tenant, Model as TenantModel,
};
use crate::tenancy::schema::{create_schema, drop_schema, provision_tenant_tables};
use crate::tenancy::{derive_schema_name, validate_schema_name};
use chrono::Utc;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait, Set, TransactionTrait,
};
use uuid::Uuid;

/// Request data for creating a new tenant
#[derive(Debug, Clone)]
pub struct CreateTenantRequest {
    /// Display name for the tenant
    pub name: String,
    /// Schema to provision; derived from the name when absent
    pub schema_name: Option<String>,
    /// Whether to provision the schema immediately
    pub auto_create_schema: bool,
}

/// Repository for Tenant database operations
pub struct TenantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TenantRepository<'a> {
    /// Create a new TenantRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new tenant, provisioning its schema when requested.
    pub async fn create_tenant(
        &self,
        request: CreateTenantRequest,
    ) -> Result<TenantModel, RepositoryError> {
        self.validate_tenant_name(&request.name)?;

        let schema_name = match request.schema_name {
            Some(explicit) => {
                validate_schema_name(&explicit)?;
                explicit
            }
            None => derive_schema_name(&request.name),
        };

        let tenant_id = Uuid::new_v4();
        let tenant = TenantActiveModel {
            id: Set(tenant_id),
            name: Set(request.name),
            schema_name: Set(schema_name.clone()),
            auto_create_schema: Set(request.auto_create_schema),
            created_at: Set(Utc::now().into()),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        // The id is generated client-side; insert without RETURNING and read
        // the row back, which also works on backends that only report a
        // rowid (SQLite cannot unpack a UUID key from the insert result).
        Tenant::insert(tenant)
            .exec_without_returning(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        let result = Tenant::find_by_id(tenant_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| {
                RepositoryError::database_error(DbErr::RecordNotFound("tenants".to_string()))
            })?;

        if request.auto_create_schema {
            create_schema(&txn, &schema_name)
                .await
                .map_err(RepositoryError::database_error)?;
            provision_tenant_tables(&txn, &schema_name)
                .await
                .map_err(RepositoryError::database_error)?;
        }

        txn.commit().await.map_err(RepositoryError::database_error)?;

        tracing::info!(
            tenant_id = %result.id,
            schema = %result.schema_name,
            provisioned = request.auto_create_schema,
            "Created tenant"
        );

        Ok(result)
    }

    /// Get tenant by ID
    pub async fn get_tenant_by_id(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<TenantModel>, RepositoryError> {
        let tenant = Tenant::find_by_id(tenant_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(tenant)
    }

    /// List all tenants
    pub async fn list_tenants(&self) -> Result<Vec<TenantModel>, RepositoryError> {
        let tenants = Tenant::find()
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(tenants)
    }

    /// Delete a tenant and drop its schema.
    pub async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), RepositoryError> {
        let tenant = Tenant::find_by_id(tenant_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Tenant not found".to_string()))?;

        let schema_name = tenant.schema_name.clone();
        let drop_owned_schema = tenant.auto_create_schema;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        tenant
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        if drop_owned_schema {
            drop_schema(&txn, &schema_name)
                .await
                .map_err(RepositoryError::database_error)?;
        }

        txn.commit().await.map_err(RepositoryError::database_error)?;

        tracing::info!(tenant_id = %tenant_id, schema = %schema_name, "Deleted tenant");

        Ok(())
    }

    /// Check if a tenant exists
    pub async fn tenant_exists(&self, tenant_id: Uuid) -> Result<bool, RepositoryError> {
        let exists = Tenant::find_by_id(tenant_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .is_some();

        Ok(exists)
    }

    /// Get tenant count
    pub async fn get_tenant_count(&self) -> Result<i64, RepositoryError> {
        let count = Tenant::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)? as i64;

        Ok(count)
    }

    /// Validate tenant name according to business rules
    fn validate_tenant_name(&self, name: &str) -> Result<(), RepositoryError> {
        if name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Tenant name cannot be empty",
            ));
        }

        if name.chars().count() > 100 {
            return Err(RepositoryError::validation_error(
                "Tenant name cannot exceed 100 characters",
            ));
        }

        Ok(())
    }
}
