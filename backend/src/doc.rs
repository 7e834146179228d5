//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (auth, travel
//!   requests, health)
//! - **Schemas**: the error payload wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`]) alongside the domain records
//! - **Security**: the bearer JWT scheme issued by `POST /api/auth/login`
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{TravelRequest, TravelStatus, User};
use crate::inbound::http::accounts::{LoginRequest, LoginResponse, RegisterRequest};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::travel_requests::{CreateTravelRequestBody, UpdateStatusBody};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Travel requests API",
        description = "Register, log in and track travel requests through approval or cancellation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::travel_requests::create_travel_request,
        crate::inbound::http::travel_requests::list_travel_requests,
        crate::inbound::http::travel_requests::get_travel_request,
        crate::inbound::http::travel_requests::update_travel_request_status,
        crate::inbound::http::travel_requests::cancel_travel_request,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        TravelRequest,
        TravelStatus,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        CreateTravelRequestBody,
        UpdateStatusBody,
        HealthStatus,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "travel-requests", description = "Travel request lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
