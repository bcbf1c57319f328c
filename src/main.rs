use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sila_chat::config::{LoggingSettings, Settings};
use sila_chat::routes::{self, AppState};
use sila_chat::services::{GeminiClient, ProductSearch, TextGeneration, WooCommerceClient};
use sila_chat::Dispatcher;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match std::env::var("SILA_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(e)
    })?;

    init_logging(&settings.logging);

    info!("Starting Sila chat service...");

    if settings.gemini.api_key.is_empty() {
        tracing::warn!("No Gemini API key configured; generated replies will fail");
    }
    if settings.store.consumer_key.is_empty() || settings.store.consumer_secret.is_empty() {
        tracing::warn!("WooCommerce credentials incomplete; product searches will fail");
    }

    let catalog: Arc<dyn ProductSearch> =
        Arc::new(WooCommerceClient::new(&settings.store).map_err(std::io::Error::other)?);
    info!("WooCommerce client initialized for {}", settings.store.url);

    let generator: Arc<dyn TextGeneration> =
        Arc::new(GeminiClient::new(&settings.gemini).map_err(std::io::Error::other)?);
    info!("Gemini client initialized (model: {})", settings.gemini.model);

    let dispatcher = Dispatcher::new(catalog, generator, &settings.dispatch);

    info!(
        "Dispatcher initialized with {} product keywords, search limit {}",
        settings.dispatch.product_keywords.len(),
        settings.dispatch.search_limit
    );

    let app_state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
