use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use order_pricing_service::application::order_service::OrderService;
use order_pricing_service::config::Config;
use order_pricing_service::domain::ports::OrderStore;
use order_pricing_service::infrastructure::memory_store::InMemoryOrderStore;
use order_pricing_service::infrastructure::order_repo::DieselOrderRepository;
use order_pricing_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let store: Arc<dyn OrderStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).map_err(io::Error::other)?;
            run_migrations(&pool).map_err(io::Error::other)?;
            log::info!("Using PostgreSQL order store");
            Arc::new(DieselOrderRepository::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL not set; orders are kept in memory and lost on restart");
            Arc::new(InMemoryOrderStore::new())
        }
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(OrderService::new(store), &config.host, config.port)?.await
}
