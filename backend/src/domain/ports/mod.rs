//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod token_service;
mod travel_request_command;
mod travel_request_notifier;
mod travel_request_query;
mod travel_request_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::{MockLoginService, MockRegistrationService};
pub use login_service::{LoginOutcome, LoginService, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{AccessClaims, IssuedToken, TOKEN_TTL, TokenError, TokenService};
#[cfg(test)]
pub use travel_request_command::MockTravelRequestCommand;
pub use travel_request_command::{
    CancelTravelRequest, CreateTravelRequest, TravelRequestCommand, UpdateTravelStatusRequest,
};
#[cfg(test)]
pub use travel_request_notifier::MockTravelRequestNotifier;
pub use travel_request_notifier::{NoOpTravelRequestNotifier, TravelRequestNotifier};
#[cfg(test)]
pub use travel_request_query::MockTravelRequestQuery;
pub use travel_request_query::TravelRequestQuery;
#[cfg(test)]
pub use travel_request_repository::MockTravelRequestRepository;
pub use travel_request_repository::{TravelRequestRepository, TravelRequestRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
