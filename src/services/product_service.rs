//! Product service for business logic operations.

use tracing::instrument;

use crate::error::AppResult;
use crate::models::{Product, ProductChanges, ProductFilter, ProductInput};
use crate::repositories::{ProductRepository, UpdateOptions};

/// Product service wrapping the `ProductRepository`.
#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    /// Creates a new ProductService with the given repository.
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Creates a new product for the given owner.
    #[instrument(skip(self, input), fields(user_id = input.user_id))]
    pub async fn create_product(&self, input: ProductInput) -> AppResult<Product> {
        self.repo.create(input).await
    }

    /// Finds the first product matching the filter.
    #[instrument(skip(self, filter))]
    pub async fn find_product(&self, filter: &ProductFilter) -> AppResult<Option<Product>> {
        self.repo.find_one(filter).await
    }

    /// Updates the first matching product; with `new` set the updated row
    /// is re-read by the original filter.
    #[instrument(skip(self, filter, changes, options))]
    pub async fn find_and_update_product(
        &self,
        filter: &ProductFilter,
        changes: &ProductChanges,
        options: UpdateOptions,
    ) -> AppResult<Option<Product>> {
        self.repo.find_one_and_update(filter, changes, options).await
    }

    /// Deletes matching products, returning the number removed.
    #[instrument(skip(self, filter))]
    pub async fn delete_product(&self, filter: &ProductFilter) -> AppResult<u64> {
        self.repo.delete_one(filter).await
    }
}
