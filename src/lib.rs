pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::comment_service::CommentService;
use application::order_service::OrderService;
use application::product_service::ProductService;
use application::user_service::UserService;
use domain::order_number::OrderNumberGenerator;
use errors::AppError;
use infrastructure::comment_repo::DieselCommentRepository;
use infrastructure::memory::{
    MemoryCommentRepository, MemoryOrderRepository, MemoryProductRepository,
    MemoryUserRepository,
};
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::product_repo::DieselProductRepository;
use infrastructure::user_repo::DieselUserRepository;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::list_user_orders,
        handlers::orders::get_order,
        handlers::orders::get_order_by_number,
        handlers::orders::update_order_status,
        handlers::orders::delete_order,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::login,
        handlers::comments::list_comments,
        handlers::comments::list_product_comments,
        handlers::comments::create_comment,
        handlers::comments::delete_comment,
    ),
    tags(
        (name = "orders", description = "Order intake and status lifecycle"),
        (name = "products", description = "Product catalogue"),
        (name = "users", description = "User registration and login"),
        (name = "comments", description = "Product comments"),
    )
)]
pub struct ApiDoc;

/// The services behind every route, each over its own repository.
#[derive(Clone)]
pub struct Services {
    pub orders: OrderService,
    pub products: ProductService,
    pub users: UserService,
    pub comments: CommentService,
}

impl Services {
    pub fn postgres(pool: DbPool, numbers: OrderNumberGenerator) -> Self {
        Self {
            orders: OrderService::new(Arc::new(DieselOrderRepository::new(pool.clone())), numbers),
            products: ProductService::new(Arc::new(DieselProductRepository::new(pool.clone()))),
            users: UserService::new(Arc::new(DieselUserRepository::new(pool.clone()))),
            comments: CommentService::new(Arc::new(DieselCommentRepository::new(pool))),
        }
    }

    /// Process-local stores; nothing survives a restart.
    pub fn in_memory(numbers: OrderNumberGenerator) -> Self {
        Self {
            orders: OrderService::new(Arc::new(MemoryOrderRepository::default()), numbers),
            products: ProductService::new(Arc::new(MemoryProductRepository::default())),
            users: UserService::new(Arc::new(MemoryUserRepository::default())),
            comments: CommentService::new(Arc::new(MemoryCommentRepository::default())),
        }
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {err}")).into()
}

/// Registers shared state and every route.
pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    use handlers::{comments, orders, products, users};

    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::Data::new(services.orders.clone()))
        .app_data(web::Data::new(services.products.clone()))
        .app_data(web::Data::new(services.users.clone()))
        .app_data(web::Data::new(services.comments.clone()))
        .service(
            web::scope("/orders")
                .route("", web::post().to(orders::create_order))
                .route("", web::get().to(orders::list_orders))
                .route("/user/{userId}", web::get().to(orders::list_user_orders))
                .route(
                    "/number/{orderNumber}",
                    web::get().to(orders::get_order_by_number),
                )
                .route("/{orderId}", web::get().to(orders::get_order))
                .route("/{orderId}", web::delete().to(orders::delete_order))
                .route(
                    "/{orderId}/status",
                    web::put().to(orders::update_order_status),
                ),
        )
        .service(
            web::scope("/products")
                .route("", web::get().to(products::list_products))
                .route("", web::post().to(products::create_product))
                .route("/{id}", web::get().to(products::get_product))
                .route("/{id}", web::put().to(products::update_product))
                .route("/{id}", web::delete().to(products::delete_product)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("", web::post().to(users::create_user))
                .route("/login", web::post().to(users::login)),
        )
        .service(
            web::scope("/comments")
                .route("", web::get().to(comments::list_comments))
                .route("", web::post().to(comments::create_comment))
                .route(
                    "/product/{productId}",
                    web::get().to(comments::list_product_comments),
                )
                .route("/{id}", web::delete().to(comments::delete_comment)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    services: Services,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, &services))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
