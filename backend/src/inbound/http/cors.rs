//! Cross-origin policy for browser front-ends.
//!
//! Browsers call the API with a bearer token, so preflights must admit the
//! `Authorization` header. Origins come from configuration; `*` admits any
//! origin (echoed back, so credentials keep working).

use std::str::FromStr;

use actix_cors::Cors;
use actix_web::http::{Method, header};
use url::Url;

use crate::middleware::trace::TRACE_ID_HEADER;

/// How long browsers may cache a preflight answer, in seconds.
pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin.
    Any,
    /// Exactly these serialised origins, e.g. `http://localhost:3000`.
    List(Vec<String>),
}

/// An entry in the origin list that is not a bare `http(s)` origin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CORS origin `{origin}`: {reason}")]
pub struct InvalidOrigin {
    pub origin: String,
    pub reason: String,
}

fn invalid(origin: &str, reason: impl Into<String>) -> InvalidOrigin {
    InvalidOrigin {
        origin: origin.to_owned(),
        reason: reason.into(),
    }
}

fn parse_origin(raw: &str) -> Result<String, InvalidOrigin> {
    let url = Url::parse(raw).map_err(|err| invalid(raw, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(raw, "scheme must be http or https"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(raw, "origins carry no path, query or fragment"));
    }
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid(raw, "origin has no host"));
    }
    Ok(origin.ascii_serialization())
}

impl FromStr for AllowedOrigins {
    type Err = InvalidOrigin;

    /// Parse a comma-separated list. A `*` entry anywhere means any origin.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.contains(&"*") {
            return Ok(Self::Any);
        }
        entries
            .into_iter()
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }
}

/// Build the CORS middleware for `origins`.
pub fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::HeaderName::from_static(TRACE_ID_HEADER)])
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
