//! # Category Repository
//!
//! Repository for the shared catalog categories. Categories live in the
//! public schema; deleting one cascades into the referencing products of
//! every tenant schema at the database level.

use crate::error::RepositoryError;
use crate::models::category::{
    ActiveModel as CategoryActiveModel, Entity as Category, Model as CategoryModel,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, Set,
};

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new CategoryRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new category
    pub async fn create_category(&self, name: String) -> Result<CategoryModel, RepositoryError> {
        self.validate_category_name(&name)?;

        let category = CategoryActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let result = category
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get category by ID
    pub async fn get_category_by_id(
        &self,
        category_id: i64,
    ) -> Result<Option<CategoryModel>, RepositoryError> {
        let category = Category::find_by_id(category_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(category)
    }

    /// List all categories
    pub async fn list_categories(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
        let categories = Category::find()
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(categories)
    }

    /// Update a category's name
    pub async fn update_category_name(
        &self,
        category_id: i64,
        name: String,
    ) -> Result<CategoryModel, RepositoryError> {
        self.validate_category_name(&name)?;

        let category = self
            .get_category_by_id(category_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound("Category not found".to_string()))?;

        let mut active_category = category.into_active_model();
        active_category.name = Set(name);

        let result = active_category
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Delete a category; referencing products go with it (cascade).
    pub async fn delete_category(&self, category_id: i64) -> Result<(), RepositoryError> {
        let category = Category::find_by_id(category_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound("Category not found".to_string()))?;

        category
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    /// Validate a category name
    fn validate_category_name(&self, name: &str) -> Result<(), RepositoryError> {
        if name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Category name cannot be empty",
            ));
        }

        if name.chars().count() > 100 {
            return Err(RepositoryError::validation_error(
                "Category name cannot exceed 100 characters",
            ));
        }

        Ok(())
    }
}
