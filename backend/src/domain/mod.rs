//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the ports that bound the hexagon, and the services
//! implementing the driving ports. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / TravelRequest: the two persisted aggregates.
//! - AccountService / TravelRequestService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod travel_request;
pub mod travel_request_service;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, PASSWORD_MIN_CHARS, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::travel_request::{
    DATE_FORMAT, NewTravelRequest, TravelDates, TravelRequest, TravelRequestDraft,
    TravelRequestFilter, TravelRequestId, TravelRequestParts, TravelRequestSearch,
    TravelRequestValidationError, TravelStatus, UnknownTravelStatus, parse_calendar_date,
};
pub use self::travel_request_service::TravelRequestService;
pub use self::user::{
    EmailAddress, NewUser, PasswordHash, User, UserCredentials, UserId, UserName,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use travel_requests::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
