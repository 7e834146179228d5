//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::ports::{
    AccessClaims, MockLoginService, MockRegistrationService, MockTokenService,
    MockTravelRequestCommand, MockTravelRequestQuery,
};
use crate::domain::{EmailAddress, UserId};
use crate::middleware::Trace;

use super::state::{HttpState, HttpStatePorts};

/// Mock ports; set expectations, then hand them to [`api_app`].
#[derive(Default)]
pub struct TestPorts {
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub travel_requests: MockTravelRequestCommand,
    pub travel_requests_query: MockTravelRequestQuery,
    pub tokens: MockTokenService,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            travel_requests: Arc::new(self.travel_requests),
            travel_requests_query: Arc::new(self.travel_requests_query),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Accept any bearer token as user `id`.
pub fn authorise_as(tokens: &mut MockTokenService, id: i64) {
    tokens.expect_verify().returning(move |_| {
        Ok(AccessClaims {
            user_id: UserId::new(id).expect("positive fixture id"),
            email: EmailAddress::new(format!("user{id}@example.com")).expect("fixture email"),
            issued_at: DateTime::<Utc>::UNIX_EPOCH,
            expires_at: DateTime::<Utc>::MAX_UTC,
        })
    });
}

/// Application serving the API routes over mock ports.
pub fn api_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(ports.into_state()))
        .configure(super::configure)
}
