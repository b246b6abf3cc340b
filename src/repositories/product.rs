//! # Product Repository
//!
//! Repository for tenant-scoped products. Every operation runs inside a
//! transaction pinned to the tenant's schema (see `tenancy::scope`), so
//! the unqualified products entity always addresses the right table.

use crate::error::RepositoryError;
use crate::models::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::tenancy::{TenantContext, begin_scoped};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    Set,
};

/// Request data for creating a product
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    /// Display name for the product
    pub name: String,
    /// Optional shared category reference
    pub category_id: Option<i64>,
    /// Price as an exact decimal
    pub price: Decimal,
}

/// Request data for updating a product; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub price: Option<Decimal>,
}

/// Repository for Product database operations
pub struct ProductRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductRepository<'a> {
    /// Create a new ProductRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a product in the tenant's schema
    pub async fn create_product(
        &self,
        ctx: &TenantContext,
        request: CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        self.validate_product_name(&request.name)?;

        let product = ProductActiveModel {
            name: Set(request.name),
            category_id: Set(request.category_id),
            price: Set(request.price),
            ..Default::default()
        };

        let txn = begin_scoped(self.db, ctx)
            .await
            .map_err(RepositoryError::database_error)?;

        let result = product
            .insert(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get a product by ID within the tenant's schema
    pub async fn get_product_by_id(
        &self,
        ctx: &TenantContext,
        product_id: i64,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let txn = begin_scoped(self.db, ctx)
            .await
            .map_err(RepositoryError::database_error)?;

        let product = Product::find_by_id(product_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(product)
    }

    /// List the tenant's products, newest first (descending identifier)
    pub async fn list_products(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let txn = begin_scoped(self.db, ctx)
            .await
            .map_err(RepositoryError::database_error)?;

        let products = Product::find()
            .order_by_desc(Column::Id)
            .all(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(products)
    }

    /// Update a product within the tenant's schema
    pub async fn update_product(
        &self,
        ctx: &TenantContext,
        product_id: i64,
        request: UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        if let Some(ref name) = request.name {
            self.validate_product_name(name)?;
        }

        let txn = begin_scoped(self.db, ctx)
            .await
            .map_err(RepositoryError::database_error)?;

        let product = Product::find_by_id(product_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Product not found".to_string()))?;

        let mut active_product = product.into_active_model();
        if let Some(name) = request.name {
            active_product.name = Set(name);
        }
        if let Some(category_id) = request.category_id {
            active_product.category_id = Set(category_id);
        }
        if let Some(price) = request.price {
            active_product.price = Set(price);
        }

        let result = active_product
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Delete a product within the tenant's schema
    pub async fn delete_product(
        &self,
        ctx: &TenantContext,
        product_id: i64,
    ) -> Result<(), RepositoryError> {
        let txn = begin_scoped(self.db, ctx)
            .await
            .map_err(RepositoryError::database_error)?;

        let product = Product::find_by_id(product_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Product not found".to_string()))?;

        product
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(())
    }

    /// Validate a product name
    fn validate_product_name(&self, name: &str) -> Result<(), RepositoryError> {
        if name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Product name cannot be empty",
            ));
        }

        if name.chars().count() > 100 {
            return Err(RepositoryError::validation_error(
                "Product name cannot exceed 100 characters",
            ));
        }

        Ok(())
    }
}
