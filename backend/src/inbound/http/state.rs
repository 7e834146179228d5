//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RegistrationService, TokenService, TravelRequestCommand, TravelRequestQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub travel_requests: Arc<dyn TravelRequestCommand>,
    pub travel_requests_query: Arc<dyn TravelRequestQuery>,
    pub tokens: Arc<dyn TokenService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub travel_requests: Arc<dyn TravelRequestCommand>,
    pub travel_requests_query: Arc<dyn TravelRequestQuery>,
    /// Verifies bearer tokens before any protected handler runs.
    pub tokens: Arc<dyn TokenService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            registration,
            login,
            travel_requests,
            travel_requests_query,
            tokens,
        } = ports;
        Self {
            registration,
            login,
            travel_requests,
            travel_requests_query,
            tokens,
        }
    }
}
