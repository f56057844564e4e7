use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::order::{Order, OrderSubmission};
use crate::errors::AppError;

use super::{require, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub message: String,
    pub order_number: String,
    pub order_id: Uuid,
    pub order: Order,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateStatusRequest {
    /// One of pending, confirmed, processing, shipped, delivered, cancelled
    /// (any case).
    pub status: String,
    pub note: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the submission, assigns a unique order number and stores the
/// order with its first timeline entry.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderSubmission,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Submission failed validation", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<OrderSubmission>,
) -> Result<HttpResponse, AppError> {
    let submission = body.into_inner();

    let order = web::block(move || service.create_order(submission)).await??;

    Ok(HttpResponse::Ok().json(CreateOrderResponse {
        message: "Order created successfully".to_string(),
        order_number: order.document.order_number.to_string(),
        order_id: order.id,
        order,
    }))
}

/// GET /orders
///
/// All live orders, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_orders()).await??;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/user/{userId}
#[utoipa::path(
    get,
    path = "/orders/user/{userId}",
    params(("userId" = String, Path, description = "Ordering user's id")),
    responses(
        (status = 200, description = "The user's orders, newest first", body = [Order]),
        (status = 400, description = "Blank user id", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_user_orders(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    require(&user_id, "User id is required")?;

    let orders = web::block(move || service.list_user_orders(&user_id)).await??;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{orderId}
#[utoipa::path(
    get,
    path = "/orders/{orderId}",
    params(("orderId" = String, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Blank order id", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    require(&order_id, "Order id is required")?;

    let order = web::block(move || service.get_order(&order_id)).await??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(AppError::NotFound("Order not found".to_string())),
    }
}

/// GET /orders/number/{orderNumber}
#[utoipa::path(
    get,
    path = "/orders/number/{orderNumber}",
    params(("orderNumber" = String, Path, description = "e.g. SP-20250102-123456")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Blank order number", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order_by_number(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_number = path.into_inner();
    require(&order_number, "Order number is required")?;

    let order = web::block(move || service.get_order_by_number(&order_number)).await??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(AppError::NotFound("Order not found".to_string())),
    }
}

/// PUT /orders/{orderId}/status
///
/// Moves the order to any of the six statuses and appends a timeline entry.
/// An unknown status is rejected before anything is written.
#[utoipa::path(
    put,
    path = "/orders/{orderId}/status",
    params(("orderId" = String, Path, description = "Order UUID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Blank id or status, or unknown status", body = MessageResponse),
        (status = 404, description = "Order not found or deleted", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<OrderService>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let request = body.into_inner();
    require(&order_id, "Order id is required")?;
    require(&request.status, "New status is required")?;

    let status = web::block(move || {
        service.update_status(&order_id, &request.status, request.note.as_deref())
    })
    .await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Order status updated to {status}"
    ))))
}

/// DELETE /orders/{orderId}
///
/// Soft delete: the order disappears from every query but stays stored.
#[utoipa::path(
    delete,
    path = "/orders/{orderId}",
    params(("orderId" = String, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 400, description = "Blank order id", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    require(&order_id, "Order id is required")?;

    web::block(move || service.delete_order(&order_id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Order deleted successfully")))
}
