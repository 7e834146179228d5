//! Port for issuing and verifying signed access tokens.
//!
//! Tokens are stateless: there is no server-side session and no revocation.
//! Expiry is the only way a token stops being accepted.

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

/// Lifetime of an issued token.
pub const TOKEN_TTL: TimeDelta = TimeDelta::hours(24);

define_port_error! {
    /// Errors raised while issuing or verifying access tokens.
    pub enum TokenError {
        /// No token was presented.
        Missing => "access token missing",
        /// The token could not be decoded or lacks required claims.
        Malformed => "access token malformed",
        /// The token has expired or its signature or algorithm does not verify.
        ExpiredOrInvalidSignature => "access token expired or signature invalid",
        /// Signing a new token failed.
        Signing { message: String } => "access token signing failed: {message}",
    }
}

/// Identity asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AccessClaims,
}

/// Issues tokens at login and verifies them on protected calls.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `user`, valid for [`TOKEN_TTL`].
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError>;
}
