//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation failures become `400 invalid_request` errors whose
//! `details` name the offending field and a stable code. Extractor failures
//! (malformed JSON, non-numeric path ids, unparseable query strings) are routed
//! through the same error type so every client-visible failure shares one shape.

use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    Error, LoginValidationError, RegistrationValidationError, TravelRequestId,
    TravelRequestValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
    PasswordTooShort,
    PasswordTooLong,
    EmptyRequesterName,
    EmptyDestination,
    InvalidDate,
    ReturnBeforeDeparture,
    InvalidId,
    InvalidBody,
    InvalidQuery,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::EmptyEmail => "empty_email",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::PasswordTooLong => "password_too_long",
            ErrorCode::EmptyRequesterName => "empty_requester_name",
            ErrorCode::EmptyDestination => "empty_destination",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::ReturnBeforeDeparture => "return_before_departure",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::User(UserValidationError::EmptyName) => ErrorCode::EmptyName,
        RegistrationValidationError::User(UserValidationError::EmptyEmail) => {
            ErrorCode::EmptyEmail
        }
        RegistrationValidationError::User(UserValidationError::InvalidEmail) => {
            ErrorCode::InvalidEmail
        }
        RegistrationValidationError::PasswordTooShort { .. } => ErrorCode::PasswordTooShort,
        RegistrationValidationError::PasswordTooLong { .. } => ErrorCode::PasswordTooLong,
        RegistrationValidationError::User(_) => ErrorCode::InvalidValue,
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => {
            field_error("email", ErrorCode::EmptyEmail, err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", ErrorCode::EmptyPassword, err.to_string())
        }
    }
}

pub(crate) fn travel_request_error(err: TravelRequestValidationError) -> Error {
    let message = err.to_string();
    match err {
        TravelRequestValidationError::EmptyRequesterName => {
            field_error("requester_name", ErrorCode::EmptyRequesterName, message)
        }
        TravelRequestValidationError::EmptyDestination => {
            field_error("destination", ErrorCode::EmptyDestination, message)
        }
        TravelRequestValidationError::InvalidDateFormat { field } => {
            field_error(field, ErrorCode::InvalidDate, message)
        }
        TravelRequestValidationError::ReturnBeforeDeparture => {
            field_error("return_date", ErrorCode::ReturnBeforeDeparture, message)
        }
        TravelRequestValidationError::NonPositiveId => {
            field_error("id", ErrorCode::InvalidId, message)
        }
    }
}

/// Validate a numeric path segment as a travel request identifier.
pub(crate) fn parse_request_id(raw: i64) -> Result<TravelRequestId, Error> {
    TravelRequestId::new(raw).map_err(travel_request_error)
}

/// JSON body extractor settings: malformed bodies are `400 invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
            .into()
    })
}

/// Path extractor settings: non-numeric identifiers are `400 invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected path parameters");
        field_error(
            "id",
            ErrorCode::InvalidId,
            "travel request id must be a positive integer",
        )
        .into()
    })
}

/// Query extractor settings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
            .into()
    })
}
