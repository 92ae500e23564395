use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{http::header, web};

use crate::{constants::MAX_SCREENSHOTS, errors::AppError, settings::AppConfig};

mod api;
mod pages;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::config_routes);

    cfg.service(
        web::scope("/api/v1")
            .configure(api::config_routes)
    );

    cfg.configure(system::config_routes);
}

/// Upload size limits. The total leaves room for one file past the maximum
/// count so an over-long selection is reported as a validation error.
pub fn multipart_config(config: &AppConfig) -> MultipartFormConfig {
    let total = config.max_screenshot_bytes.saturating_mul(MAX_SCREENSHOTS + 1) + 64 * 1024;

    MultipartFormConfig::default()
        .total_limit(total)
        .memory_limit(64 * 1024)
        .error_handler(|err, _req| AppError::from(err).into())
}

pub fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
