//! Product repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductChanges, ProductFilter, ProductInput};
use crate::repositories::UpdateOptions;
use crate::utils::ident;

/// Product repository holding an async connection pool.
#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new product.
    ///
    /// A fresh external `product_id` is generated here; callers never
    /// supply one.
    ///
    /// # Returns
    /// The created product with generated id and timestamps
    pub async fn create(&self, input: ProductInput) -> AppResult<Product> {
        use crate::schema::products::dsl::*;

        let new_product = NewProduct::from_input(ident::product_id(), input);

        let mut conn = self.pool.get().await?;
        diesel::insert_into(products)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a product by its internal ID.
    pub async fn find_by_id(&self, pk: i32) -> AppResult<Option<Product>> {
        self.find_one(&ProductFilter::by_id(pk)).await
    }

    /// Finds the first product matching the filter; empty filters return
    /// `None` without querying.
    pub async fn find_one(&self, filter: &ProductFilter) -> AppResult<Option<Product>> {
        use crate::schema::products::dsl::*;

        let Some(predicate) = filter.predicate() else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        products
            .filter(predicate)
            .limit(1)
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies a partial update to the products matching the filter.
    ///
    /// The statement itself carries no row cap, so a filter matching
    /// several rows updates all of them; callers keep it single-row by
    /// filtering on a unique column (`id` or `product_id`).
    ///
    /// No-ops to `None` when either the filter or the changeset is empty,
    /// or when nothing matched. Without `options.new` the first pre-update
    /// match is returned. With `options.new` the updated row is re-read
    /// using the ORIGINAL filter: if the update changed a column that
    /// filter references, the re-read can return a different row than the
    /// one updated, or none at all. Callers that need the exact row back
    /// should filter by a column the update does not touch.
    pub async fn find_one_and_update(
        &self,
        filter: &ProductFilter,
        changes: &ProductChanges,
        options: UpdateOptions,
    ) -> AppResult<Option<Product>> {
        use crate::schema::products::dsl::*;

        if changes.is_empty() {
            return Ok(None);
        }
        let Some(predicate) = filter.predicate() else {
            return Ok(None);
        };

        let Some(before) = self.find_one(filter).await? else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        let affected = diesel::update(products.filter(predicate))
            .set(changes)
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        drop(conn);

        if affected == 0 {
            return Ok(None);
        }

        if options.new {
            return self.find_one(filter).await;
        }

        Ok(Some(before))
    }

    /// Deletes the products matching the filter.
    ///
    /// Returns the number of rows removed; an empty filter deletes nothing
    /// and issues no statement. Like the update path, the statement carries
    /// no row cap: every matching row is deleted, and callers keep it
    /// single-row by filtering on a unique column (`id` or `product_id`).
    pub async fn delete_one(&self, filter: &ProductFilter) -> AppResult<u64> {
        use crate::schema::products::dsl::*;

        let Some(predicate) = filter.predicate() else {
            return Ok(0);
        };

        let mut conn = self.pool.get().await?;
        diesel::delete(products.filter(predicate))
            .execute(&mut conn)
            .await
            .map(|n| n as u64)
            .map_err(AppError::from)
    }
}
