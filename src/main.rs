mod handlers;
mod models;
mod routes;
mod state;
mod structs;
mod utils;

use crate::state::app_state::AppState;
use crate::utils::config::AppConfig;
use crate::utils::font::load_caption_font;
use crate::utils::qr_encoder::QrEncoder;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Load the caption font once, every worker shares it
    let font = match load_caption_font(config.font_path.as_deref()) {
        Ok(font) => font,
        Err(e) => {
            log::error!("Error loading caption font: {:#}", e);
            std::process::exit(1);
        }
    };
    let encoder = QrEncoder::new(font);
    if !encoder.has_font() {
        log::warn!("No caption font found, displayContent requests will be rejected");
    }

    let app_state = web::Data::new(AppState { encoder });
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!(
        "Starting QR code API on {}:{}",
        config.bind_address,
        config.port
    );

    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .expose_headers(vec![http::header::CONTENT_TYPE])
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
