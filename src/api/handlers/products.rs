//! Product CRUD request handlers.
//!
//! Products are addressed by their external `product_xxxxxxxxxx`
//! identifier, never by the numeric row id. Reads are public; writes are
//! restricted to the owning user.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::api::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductFilter};
use crate::repositories::UpdateOptions;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the public product routes.
///
/// Routes:
/// - GET /{product_id} - Fetch a product by external identifier
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{product_id}", get(get_product))
}

/// Creates the product routes that require an authenticated user.
///
/// Routes:
/// - POST /             - Create a product owned by the caller
/// - PUT /{product_id}  - Update an owned product
/// - DELETE /{product_id} - Delete an owned product
pub fn protected_product_routes() -> Router<AppState> {
    Router::new().route("/", post(create_product)).route(
        "/{product_id}",
        axum::routing::put(update_product).delete(delete_product),
    )
}

fn product_not_found(product_id: &str) -> AppError {
    AppError::NotFound {
        entity: "product".to_string(),
        field: "product_id".to_string(),
        value: product_id.to_string(),
    }
}

/// Looks up a product by external id, answering 404 when absent.
async fn load_product(state: &AppState, product_id: &str) -> AppResult<Product> {
    state
        .services
        .products
        .find_product(&ProductFilter::by_product_id(product_id))
        .await?
        .ok_or_else(|| product_not_found(product_id))
}

/// POST /api/products - Create a product
///
/// Returns 201 Created with the stored product, including its generated
/// external identifier.
async fn create_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let input = payload.into_input(auth_user.user_id);
    let product = state.services.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// GET /api/products/{product_id} - Fetch a product
async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = load_product(&state, &product_id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// PUT /api/products/{product_id} - Update an owned product
///
/// Answers 404 when the product does not exist and 403 when it exists but
/// belongs to someone else. The 404 check runs first so an owner probing a
/// bad id is not told anything about other users' products.
async fn update_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(product_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = load_product(&state, &product_id).await?;
    if product.user_id != auth_user.user_id {
        return Err(AppError::Forbidden {
            message: "You do not own this product".to_string(),
        });
    }

    let changes = payload.into_changes();
    let updated = state
        .services
        .products
        .find_and_update_product(
            &ProductFilter::by_product_id(&product_id),
            &changes,
            UpdateOptions::returning_new(),
        )
        .await?
        .ok_or_else(|| product_not_found(&product_id))?;

    Ok(Json(ProductResponse::from(updated)))
}

/// DELETE /api/products/{product_id} - Delete an owned product
///
/// Returns 200 with the product that was removed.
async fn delete_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = load_product(&state, &product_id).await?;
    if product.user_id != auth_user.user_id {
        return Err(AppError::Forbidden {
            message: "You do not own this product".to_string(),
        });
    }

    state
        .services
        .products
        .delete_product(&ProductFilter::by_product_id(&product_id))
        .await?;

    Ok(Json(ProductResponse::from(product)))
}
