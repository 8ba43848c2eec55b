//! Product-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Product, ProductChanges, ProductInput};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description should be at least 10 characters long"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
}

impl CreateProductRequest {
    /// Combines the payload with the authenticated owner into the
    /// repository input.
    pub fn into_input(self, user_id: i32) -> ProductInput {
        ProductInput {
            user_id,
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
        }
    }
}

/// Request body for partially updating a product.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Description should be at least 10 characters long"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: Option<String>,
}

impl UpdateProductRequest {
    /// Converts the request DTO into a changeset; `None` fields stay
    /// untouched in the database.
    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for a product row.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub product_id: String,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_id: product.product_id,
            user_id: product.user_id,
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image,
            created_at: product
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: product
                .updated_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_to_changes_keeps_partiality() {
        let request = UpdateProductRequest {
            price: Some(42.5),
            ..UpdateProductRequest::default()
        };
        let changes = request.into_changes();
        assert_eq!(changes.price, Some(42.5));
        assert!(changes.title.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_empty_update_request_gives_empty_changes() {
        let changes = UpdateProductRequest::default().into_changes();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let request = CreateProductRequest {
            title: "Canon EOS 1500D".to_string(),
            description: "DSLR camera designed for first-time users".to_string(),
            price: -1.0,
            image: "https://example.com/camera.jpg".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
