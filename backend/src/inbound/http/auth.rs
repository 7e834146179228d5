//! Bearer-token authentication for protected HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! token extraction and identity derivation here. Handlers that take an
//! [`AuthenticatedUser`] argument reject unauthenticated calls with
//! `401 Unauthorized` before their body runs, so no port is touched.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::{AccessClaims, TokenError, TokenService};
use crate::domain::{EmailAddress, Error, UserId};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    email: EmailAddress,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<AccessClaims> for AuthenticatedUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let value = header.ok_or(TokenError::Missing)?;
    let (scheme, token) = value.trim().split_once(' ').ok_or(TokenError::Missing)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(TokenError::Missing);
    }
    Ok(token.trim())
}

fn unauthorized(err: &TokenError) -> Error {
    let message = match err {
        TokenError::Missing => "authentication required",
        TokenError::Malformed => "malformed token",
        TokenError::ExpiredOrInvalidSignature => "token expired or invalid",
        TokenError::Signing { .. } => "token could not be verified",
    };
    Error::unauthorized(message)
}

/// Verify the request's bearer token with `tokens`.
pub fn authenticate(
    tokens: &dyn TokenService,
    header: Option<&str>,
) -> Result<AuthenticatedUser, Error> {
    bearer_token(header)
        .and_then(|token| tokens.verify(token))
        .map(AuthenticatedUser::from)
        .map_err(|err| {
            debug!(error = %err, "bearer authentication failed");
            unauthorized(&err)
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            return ready(Err(Error::internal("HTTP state is not configured")));
        };
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        ready(authenticate(state.tokens.as_ref(), header))
    }
}
