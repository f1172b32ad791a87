//! CORS middleware configuration for cross-origin requests.
//!
//! Permissive in development so the web and mobile clients can be pointed
//! at a local server; restricted to configured origins in production.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sepm_shared::config::Environment;

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for `environment`.
///
/// `allowed_origins` is only consulted in production.
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    if environment.is_production() {
        create_production_cors(allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(CORS_MAX_AGE)
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(CORS_MAX_AGE);

    for origin in allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
