use actix_web::{HttpResponse, ResponseError, Result, error, web};
use validator::Validate;

use crate::state::app_state::AppState;
use crate::structs::qr_request::{QrContent, UrlQrRequest, WifiQrRequest};

/// Largest JSON body accepted by the QR endpoints
const MAX_BODY_SIZE: usize = 64 * 1024;

/// JSON extractor settings for the QR endpoints.
///
/// Bodies are parsed as JSON whatever the Content-Type says (`curl -d` sends
/// form-urlencoded) and extraction failures are answered as JSON.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_SIZE)
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, req| {
            log::warn!("Rejected request body for {}: {}", req.path(), err);
            let response = HttpResponse::build(err.status_code())
                .json(serde_json::json!({ "error": err.to_string() }));
            error::InternalError::from_response(err, response).into()
        })
}

/// Generate a QR code for a URL
pub async fn generate_url_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<UrlQrRequest>,
) -> Result<HttpResponse> {
    log::info!("Processing URL QR code request");
    render_qr(app_state, req).await
}

/// Generate a QR code that joins a WiFi network
pub async fn generate_wifi_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<WifiQrRequest>,
) -> Result<HttpResponse> {
    log::info!("Processing WiFi QR code request");
    render_qr(app_state, req).await
}

async fn render_qr<R>(app_state: web::Data<AppState>, req: R) -> Result<HttpResponse>
where
    R: QrContent + Validate,
{
    if let Err(errors) = req.validate() {
        log::warn!("QR request failed validation: {}", errors);
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let content = req.content();
    if content.is_empty() {
        log::warn!("QR request produced empty content");
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "QR content must not be empty"
        })));
    }

    let options = req.options().encode_options();

    // Rasterizing is CPU bound, keep it off the async workers
    let encoded = web::block(move || app_state.encoder.encode(&content, &options)).await;

    match encoded {
        Ok(Ok(png)) => Ok(HttpResponse::Ok().content_type("image/png").body(png)),
        Ok(Err(e)) => {
            log::error!("QR code generation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "QR code generation failed"
            })))
        }
        Err(e) => {
            log::error!("QR encoder task failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })))
        }
    }
}
