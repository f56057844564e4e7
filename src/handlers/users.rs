use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::user_service::UserService;
use crate::domain::user::{NewUser, User};
use crate::errors::AppError;

use super::MessageResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub success: bool,
}

/// GET /users
///
/// Password hashes are never serialized.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    let users = web::block(move || service.list_users()).await??;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User registered", body = CreateUserResponse),
        (status = 400, description = "Missing or malformed field", body = MessageResponse),
        (status = 409, description = "Username or email already in use", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    let new_user = body.into_inner();

    let user = web::block(move || service.create_user(new_user)).await??;

    Ok(HttpResponse::Ok().json(CreateUserResponse {
        message: "User registered successfully".to_string(),
        user,
    }))
}

/// POST /users/login
///
/// No session or token is issued; the caller only learns whether the
/// credentials match.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match", body = LoginResponse),
        (status = 400, description = "Username or password missing", body = MessageResponse),
        (status = 401, description = "Unknown user or wrong password", body = MessageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn login(
    service: web::Data<UserService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    let user = web::block(move || service.login(&username, &password)).await??;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        user,
        success: true,
    }))
}
