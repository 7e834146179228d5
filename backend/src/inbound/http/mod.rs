//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
pub mod cors;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod travel_requests;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the API routes together with extractor settings that turn
/// malformed input into `400 invalid_request` responses.
///
/// Callers supply `web::Data<state::HttpState>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .configure(accounts::configure)
        .configure(travel_requests::configure);
}
