pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::error::Error;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;

use application::order_service::OrderService;
use domain::ports::OrderStore;
use errors::AppError;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The service as shared by every HTTP worker.
pub type SharedOrderService = OrderService<Arc<dyn OrderStore>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::get_orders_by_customer,
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderItemRequest,
        handlers::orders::ProductRequest,
        handlers::orders::CustomerDto,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::ProductResponse,
    )),
    tags((name = "orders", description = "Order creation and lookup"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

fn order_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("", web::post().to(handlers::orders::create_order))
        .route(
            "/customer/{customer_id}",
            web::get().to(handlers::orders::get_orders_by_customer),
        )
        .route("/{id}", web::get().to(handlers::orders::get_order))
}

/// Register the order routes, the OpenAPI document and JSON error handling.
///
/// Order routes are served under both `/orders` and `/v1/orders`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::NotFound(err.to_string()).into()
    }))
    .route("/api-docs/openapi.json", web::get().to(openapi_json))
    .service(order_routes("/orders"))
    .service(order_routes("/v1/orders"));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: SharedOrderService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
