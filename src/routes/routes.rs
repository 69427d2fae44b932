use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{generate_url_qr, generate_wifi_qr, json_config};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
    // QR generation routes - no auth, JSON in, PNG out
    cfg.service(
        web::scope("/qrcode")
            .app_data(json_config())
            .service(web::resource("/url").route(web::post().to(generate_url_qr)))
            .service(web::resource("/wifi").route(web::post().to(generate_wifi_qr))),
    );
}
