//! # Domain Repository
//!
//! Repository for hostname-to-tenant mappings. Hostnames are unique across
//! the whole installation; the database enforces this with a unique index.

use crate::error::RepositoryError;
use crate::models::domain::{
    ActiveModel as DomainActiveModel, Column, Entity as Domain, Model as DomainModel,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

/// Request data for registering a domain
#[derive(Debug, Clone)]
pub struct CreateDomainRequest {
    /// Hostname to register, e.g. `shop.example.com`
    pub hostname: String,
    /// Tenant that serves this hostname
    pub tenant_id: Uuid,
    /// Whether this is the tenant's primary hostname
    pub is_primary: bool,
}

/// Repository for Domain database operations
pub struct DomainRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DomainRepository<'a> {
    /// Create a new DomainRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a hostname for a tenant
    pub async fn create_domain(
        &self,
        request: CreateDomainRequest,
    ) -> Result<DomainModel, RepositoryError> {
        self.validate_hostname(&request.hostname)?;

        let domain_id = Uuid::new_v4();
        let domain = DomainActiveModel {
            id: Set(domain_id),
            hostname: Set(request.hostname.to_ascii_lowercase()),
            tenant_id: Set(request.tenant_id),
            is_primary: Set(request.is_primary),
            created_at: Set(Utc::now().into()),
        };

        // Client-side UUID key; insert without RETURNING and read the row
        // back so the create also works on rowid-only backends.
        Domain::insert(domain)
            .exec_without_returning(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let result = Domain::find_by_id(domain_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| {
                RepositoryError::database_error(DbErr::RecordNotFound("domains".to_string()))
            })?;

        Ok(result)
    }

    /// Find a domain by its hostname
    pub async fn get_by_hostname(
        &self,
        hostname: &str,
    ) -> Result<Option<DomainModel>, RepositoryError> {
        let domain = Domain::find()
            .filter(Column::Hostname.eq(hostname.to_ascii_lowercase()))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(domain)
    }

    /// List all registered domains
    pub async fn list_domains(&self) -> Result<Vec<DomainModel>, RepositoryError> {
        let domains = Domain::find()
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(domains)
    }

    /// List domains belonging to one tenant
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<DomainModel>, RepositoryError> {
        let domains = Domain::find()
            .filter(Column::TenantId.eq(tenant_id))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(domains)
    }

    /// Delete a domain
    pub async fn delete_domain(&self, domain_id: Uuid) -> Result<(), RepositoryError> {
        let domain = Domain::find_by_id(domain_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Domain not found".to_string()))?;

        domain
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    /// Validate a hostname before registration
    fn validate_hostname(&self, hostname: &str) -> Result<(), RepositoryError> {
        if hostname.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Hostname cannot be empty",
            ));
        }

        if hostname.len() > 253 {
            return Err(RepositoryError::validation_error(
                "Hostname cannot exceed 253 characters",
            ));
        }

        if !hostname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(RepositoryError::validation_error(
                "Hostname can only contain letters, digits, dots, and hyphens",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{CreateTenantRequest, TenantRepository};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> (DatabaseConnection, Uuid) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("apply migrations");

        let tenant = TenantRepository::new(&db)
            .create_tenant(CreateTenantRequest {
                name: "Acme Corp".to_string(),
                schema_name: None,
                auto_create_schema: false,
            })
            .await
            .expect("create tenant");

        (db, tenant.id)
    }

    #[tokio::test]
    async fn register_and_resolve_hostname() {
        let (db, tenant_id) = setup().await;
        let repo = DomainRepository::new(&db);

        let domain = repo
            .create_domain(CreateDomainRequest {
                hostname: "Shop.Example.COM".to_string(),
                tenant_id,
                is_primary: true,
            })
            .await
            .unwrap();

        // Hostnames are stored lowercased
        assert_eq!(domain.hostname, "shop.example.com");

        let found = repo.get_by_hostname("shop.example.com").await.unwrap();
        assert_eq!(found.unwrap().tenant_id, tenant_id);

        assert!(repo.get_by_hostname("other.example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_hostname_is_rejected() {
        let (db, tenant_id) = setup().await;
        let repo = DomainRepository::new(&db);

        let request = CreateDomainRequest {
            hostname: "shop.example.com".to_string(),
            tenant_id,
            is_primary: true,
        };

        repo.create_domain(request.clone()).await.unwrap();
        let duplicate = repo.create_domain(request).await;

        assert!(matches!(duplicate, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn rejects_invalid_hostnames() {
        let (db, tenant_id) = setup().await;
        let repo = DomainRepository::new(&db);

        for hostname in ["", "bad host", "evil;host"] {
            let result = repo
                .create_domain(CreateDomainRequest {
                    hostname: hostname.to_string(),
                    tenant_id,
                    is_primary: false,
                })
                .await;
            assert!(matches!(result, Err(RepositoryError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn list_and_delete_domains() {
        let (db, tenant_id) = setup().await;
        let repo = DomainRepository::new(&db);

        let first = repo
            .create_domain(CreateDomainRequest {
                hostname: "a.example.com".to_string(),
                tenant_id,
                is_primary: true,
            })
            .await
            .unwrap();
        repo.create_domain(CreateDomainRequest {
            hostname: "b.example.com".to_string(),
            tenant_id,
            is_primary: false,
        })
        .await
        .unwrap();

        assert_eq!(repo.list_domains().await.unwrap().len(), 2);
        assert_eq!(repo.list_for_tenant(tenant_id).await.unwrap().len(), 2);

        repo.delete_domain(first.id).await.unwrap();
        assert_eq!(repo.list_domains().await.unwrap().len(), 1);

        let missing = repo.delete_domain(Uuid::new_v4()).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }
}
