use dotenvy::dotenv;
use shop_service::domain::order_number::OrderNumberGenerator;
use shop_service::{build_server, create_pool, run_migrations, AppConfig, Services};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = create_pool(&config.database_url, config.db_pool_size)
        .map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let services = Services::postgres(
        pool,
        OrderNumberGenerator::new(config.order_number_max_attempts),
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!(
        "API docs at http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    build_server(services, &config.host, config.port)?.await
}
