//! HTTP handlers for customer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::customer::{CreateCustomerInput, Customer, UpdateCustomerInput};
use crate::services::CustomerService;
use crate::AppState;

/// Create a customer
pub async fn create_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    let service = CustomerService::new(state.db);
    let customer = service.create_customer(input).await?;

    tracing::debug!(
        "Customer {} created by user {}",
        customer.id,
        current_user.0.user_id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(customer))))
}

/// List all customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Customer>>>> {
    let service = CustomerService::new(state.db);
    let customers = service.list_customers().await?;
    Ok(Json(ApiResponse::new(customers)))
}

/// Get a specific customer
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let service = CustomerService::new(state.db);
    let customer = service.get_customer(customer_id).await?;
    Ok(Json(ApiResponse::new(customer)))
}

/// Update a customer
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let service = CustomerService::new(state.db);
    let customer = service.update_customer(customer_id, input).await?;
    Ok(Json(ApiResponse::new(customer)))
}

/// Delete a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(customer_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CustomerService::new(state.db);
    service.delete_customer(customer_id).await?;

    tracing::info!(
        "Customer {} deleted by user {}",
        customer_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
