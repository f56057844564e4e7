use actix_web::{web, HttpResponse};

use crate::application::comment_service::CommentService;
use crate::domain::comment::{Comment, NewComment};
use crate::errors::AppError;

use super::{require, MessageResponse};

#[utoipa::path(
    get,
    path = "/comments",
    responses(
        (status = 200, description = "All comments, newest first", body = [Comment]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "comments"
)]
pub async fn list_comments(service: web::Data<CommentService>) -> Result<HttpResponse, AppError> {
    let comments = web::block(move || service.list_comments()).await??;
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    get,
    path = "/comments/product/{productId}",
    params(("productId" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product's comments, newest first", body = [Comment]),
        (status = 400, description = "Blank product id", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "comments"
)]
pub async fn list_product_comments(
    service: web::Data<CommentService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    require(&product_id, "Product id is required")?;

    let comments = web::block(move || service.list_product_comments(&product_id)).await??;
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    post,
    path = "/comments",
    request_body = NewComment,
    responses(
        (status = 200, description = "Comment stored", body = Comment),
        (status = 400, description = "Missing field", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "comments"
)]
pub async fn create_comment(
    service: web::Data<CommentService>,
    body: web::Json<NewComment>,
) -> Result<HttpResponse, AppError> {
    let comment = body.into_inner();

    let stored = web::block(move || service.create_comment(comment)).await??;
    Ok(HttpResponse::Ok().json(stored))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = String, Path, description = "Comment UUID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 404, description = "Comment not found", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    service: web::Data<CommentService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let comment_id = path.into_inner();
    require(&comment_id, "Comment id is required")?;

    web::block(move || service.delete_comment(&comment_id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}
