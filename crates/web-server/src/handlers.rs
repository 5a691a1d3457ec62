use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, State},
};
use core_types::{Customer, CustomerId, CustomerPayload};
use std::sync::Arc;

fn parse_id(raw: &str) -> Result<CustomerId, AppError> {
    Ok(raw.parse::<CustomerId>()?)
}

/// # GET /customer
/// Fetches every customer in store order.
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.store.list().await?;
    Ok(Json(customers))
}

/// # GET /customer/:id
pub async fn get_customer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_id(&id)?;
    state.store.find(id).await?.map(Json).ok_or(AppError::NotFound)
}

/// # POST /customer
/// Validates the payload and inserts it; the store assigns the identifier.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    let new = payload.into_new_customer()?;
    let customer = state.store.insert(new).await?;
    tracing::info!(customer_id = %customer.id, "Customer created.");
    Ok(Json(customer))
}

/// # PUT /customer and PATCH /customer
/// The body names its target with `id` (or `_id`); every other allow-listed field
/// present in the body replaces the stored value.
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    let (id, patch) = payload.into_update()?;
    let customer = state.store.update(id, patch).await?.ok_or(AppError::NotFound)?;
    tracing::info!(customer_id = %customer.id, "Customer updated.");
    Ok(Json(customer))
}

/// # DELETE /customer/:id
/// Returns the record as it was before deletion.
pub async fn delete_customer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_id(&id)?;
    let customer = state.store.delete(id).await?.ok_or(AppError::NotFound)?;
    tracing::info!(customer_id = %customer.id, "Customer deleted.");
    Ok(Json(customer))
}
