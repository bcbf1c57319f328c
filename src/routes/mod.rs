// Route exports
pub mod chat;

use actix_web::web;

pub use chat::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(chat::liveness))
        .route("/health", web::get().to(chat::health_check))
        .service(
            web::scope("/api")
                .app_data(web::JsonConfig::default().error_handler(chat::handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(chat::handle_query_payload_error))
                .configure(chat::configure),
        );
}
