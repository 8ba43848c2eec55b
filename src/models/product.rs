use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

use crate::models::BoxedPredicate;
use crate::schema::products;

/// Product model for reading from database.
///
/// `product_id` is the external-facing identifier handed out to clients;
/// `id` is the internal serial key and never leaves the API boundary as a
/// lookup handle.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i32,
    pub product_id: String,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Caller-supplied fields for creating a product. The repository adds the
/// generated `product_id` before insertion.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductInput {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

/// NewProduct model for inserting new records.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub product_id: String,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

impl NewProduct {
    pub fn from_input(external_id: String, input: ProductInput) -> Self {
        Self {
            product_id: external_id,
            user_id: input.user_id,
            title: input.title,
            description: input.description,
            price: input.price,
            image: input.image,
        }
    }
}

/// Partial update for the products table. `None` fields are left untouched
/// and the primary key cannot be updated at all.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
    }
}

/// Partial query over the products table.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub id: Option<i32>,
    pub product_id: Option<String>,
    pub user_id: Option<i32>,
}

impl ProductFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_product_id(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.product_id.is_none() && self.user_id.is_none()
    }

    /// Compiles all present fields into one AND-ed predicate, `None` when
    /// the filter is empty.
    pub fn predicate(&self) -> Option<BoxedPredicate<products::table>> {
        let mut clause: Option<BoxedPredicate<products::table>> = None;
        if let Some(v) = self.id {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(products::id.eq(v))),
                None => Box::new(products::id.eq(v)),
            });
        }
        if let Some(v) = self.product_id.clone() {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(products::product_id.eq(v))),
                None => Box::new(products::product_id.eq(v)),
            });
        }
        if let Some(v) = self.user_id {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(products::user_id.eq(v))),
                None => Box::new(products::user_id.eq(v)),
            });
        }
        clause
    }
}
