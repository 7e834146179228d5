//! Shared harness for HTTP integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the wiring below is the one place that assembles the services over
//! in-memory stores, low-cost bcrypt, real HS256 tokens and a controllable
//! clock.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use travel_requests::Trace;
use travel_requests::domain::{AccountService, TravelRequestService};
use travel_requests::inbound::http;
use travel_requests::inbound::http::health::HealthState;
use travel_requests::inbound::http::state::{HttpState, HttpStatePorts};
use travel_requests::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService};
use travel_requests::test_support::{
    InMemoryTravelRequestRepository, InMemoryUserRepository, MutableClock, RecordingNotifier,
};

/// Lowest cost bcrypt accepts; keeps the suite fast.
const TEST_BCRYPT_COST: u32 = 4;

pub fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-08-01T09:00:00Z")
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}

/// Adapters behind one application instance, kept for inspection.
pub struct World {
    pub clock: Arc<MutableClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub travel_requests: Arc<InMemoryTravelRequestRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub tokens: Arc<JwtTokenService>,
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
}

impl World {
    pub fn new() -> Self {
        Self::with_secret(b"integration-test-secret")
    }

    /// A world whose tokens are signed with `secret`.
    pub fn with_secret(secret: &[u8]) -> Self {
        let clock = Arc::new(MutableClock::new(start()));
        let users = Arc::new(InMemoryUserRepository::new());
        let travel_requests = Arc::new(InMemoryTravelRequestRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let secret = JwtSecret::new(secret);
        let tokens = Arc::new(JwtTokenService::new(&secret, clock.clone()));

        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
            tokens.clone(),
            clock.clone(),
        ));
        let requests = Arc::new(TravelRequestService::new(
            travel_requests.clone(),
            notifier.clone(),
            clock.clone(),
        ));
        let state = HttpState::new(HttpStatePorts {
            registration: accounts.clone(),
            login: accounts,
            travel_requests: requests.clone(),
            travel_requests_query: requests,
            tokens: tokens.clone(),
        });

        Self {
            health: web::Data::new(HealthState::new(clock.clone())),
            clock,
            users,
            travel_requests,
            notifier,
            tokens,
            state: web::Data::new(state),
        }
    }

    /// Build the application over this world's adapters.
    ///
    /// The factory holds clones of the shared state, never `self`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(self.health.clone())
            .wrap(Trace)
            .configure(http::health::configure)
            .configure(http::configure)
    }
}

/// Send a request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    name: &str,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": name, "email": email, "password": password})),
    )
    .await
}

pub async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": email, "password": password})),
    )
    .await
}

/// Register and log in, returning the bearer token.
pub async fn signed_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> String {
    let (status, _) = register(app, name, email, "secret").await;
    assert_eq!(status, StatusCode::CREATED, "registration of {email}");
    let (status, body) = login(app, email, "secret").await;
    assert_eq!(status, StatusCode::OK, "login of {email}");
    body["token"].as_str().expect("token").to_owned()
}

pub async fn create_request(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    destination: &str,
    departure: &str,
    ret: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/api/travel-requests")
            .insert_header(bearer(token))
            .set_json(json!({
                "requester_name": "Requester",
                "destination": destination,
                "departure_date": departure,
                "return_date": ret,
            })),
    )
    .await
}

pub async fn update_status(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    id: i64,
    status: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/travel-requests/{id}/status"))
            .insert_header(bearer(token))
            .set_json(json!({ "status": status })),
    )
    .await
}

pub async fn cancel(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    id: i64,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/travel-requests/{id}"))
            .insert_header(bearer(token)),
    )
    .await
}

pub async fn list(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    query: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/travel-requests{query}"))
            .insert_header(bearer(token)),
    )
    .await
}
