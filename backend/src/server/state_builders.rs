//! Builders wiring the outbound adapters into HTTP state.

use std::sync::Arc;

use mockable::Clock;

use travel_requests::domain::ports::{
    PasswordHasher, TokenService, TravelRequestNotifier, TravelRequestRepository, UserRepository,
};
use travel_requests::domain::{AccountService, TravelRequestService};
use travel_requests::inbound::http::state::{HttpState, HttpStatePorts};
use travel_requests::outbound::notifications::TracingTravelRequestNotifier;
use travel_requests::outbound::persistence::{
    DbPool, DieselTravelRequestRepository, DieselUserRepository,
};
use travel_requests::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService};

/// Driven adapters the services are built from.
pub struct Adapters<U, T> {
    pub users: Arc<U>,
    pub travel_requests: Arc<T>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub notifier: Arc<dyn TravelRequestNotifier>,
    pub clock: Arc<dyn Clock>,
}

/// Assemble the services over any repository implementations.
pub fn build_http_state<U, T>(adapters: Adapters<U, T>) -> HttpState
where
    U: UserRepository + 'static,
    T: TravelRequestRepository + 'static,
{
    let Adapters {
        users,
        travel_requests,
        hasher,
        tokens,
        notifier,
        clock,
    } = adapters;

    let accounts = Arc::new(AccountService::new(
        users,
        hasher,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let requests = Arc::new(TravelRequestService::new(travel_requests, notifier, clock));

    HttpState::new(HttpStatePorts {
        registration: accounts.clone(),
        login: accounts,
        travel_requests: requests.clone(),
        travel_requests_query: requests,
        tokens,
    })
}

/// Production wiring: Diesel repositories, bcrypt, HS256 tokens and
/// log-backed notifications.
pub fn build_production_state(pool: &DbPool, secret: &JwtSecret, clock: Arc<dyn Clock>) -> HttpState {
    build_http_state(Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        travel_requests: Arc::new(DieselTravelRequestRepository::new(pool.clone())),
        hasher: Arc::new(BcryptPasswordHasher::default()),
        tokens: Arc::new(JwtTokenService::new(secret, Arc::clone(&clock))),
        notifier: Arc::new(TracingTravelRequestNotifier),
        clock,
    })
}
