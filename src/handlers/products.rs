use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::product_service::ProductService;
use crate::domain::product::{Product, ProductInput};
use crate::errors::AppError;

use super::{require, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub message: String,
    pub product: Product,
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || service.list_products()).await??;
    Ok(HttpResponse::Ok().json(products))
}

/// POST /products
///
/// The discount is clamped to 0..=100 and the discounted price derived
/// from it.
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Missing field or negative price", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<ProductService>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();

    let product = web::block(move || service.create_product(input)).await??;

    Ok(HttpResponse::Ok().json(CreateProductResponse {
        message: "Product added successfully".to_string(),
        product,
    }))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    require(&product_id, "Product id is required")?;

    match web::block(move || service.get_product(&product_id)).await?? {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Err(AppError::NotFound("Product not found".to_string())),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Missing field or negative price", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn update_product(
    service: web::Data<ProductService>,
    path: web::Path<String>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let input = body.into_inner();
    require(&product_id, "Product id is required")?;

    web::block(move || service.update_product(&product_id, input)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Product updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    require(&product_id, "Product id is required")?;

    web::block(move || service.delete_product(&product_id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Product deleted successfully")))
}
