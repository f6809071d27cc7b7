mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod store;
mod structs;
mod utils;

use crate::services::allocator::Allocator;
use crate::state::app_state::AppState;
use crate::store::ShortLinkStore;
use crate::store::memory::MemoryLinkStore;
use crate::utils::codegen::RandomCodeGenerator;
use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use std::env;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let base_url = env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));
    let ip_salt = env::var("IP_SALT").unwrap_or_default();

    // The store is the single synchronization point; handlers and the
    // allocator only ever go through its atomic operations.
    let store: Arc<dyn ShortLinkStore> = Arc::new(MemoryLinkStore::new());
    let allocator = Allocator::new(store.clone(), Arc::new(RandomCodeGenerator));

    // Create shared state
    let app_state = web::Data::new(AppState {
        store,
        allocator,
        base_url: base_url.clone(),
        ip_salt,
    });

    log::info!("service.start port={} base_url={}", port, base_url);

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        // Enable CORS for all origins
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(web::JsonConfig::default().limit(50 * 1024))
            .configure(init_routes)
    })
    .bind(("0.0.0.0", port))
    .with_context(|| format!("failed to bind port {}", port))?
    .run()
    .await?;

    Ok(())
}
