//! Driving ports for account use-cases: sign-up and login.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them
//! without knowing (or importing) the backing infrastructure, which keeps
//! HTTP handler tests deterministic.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

use super::IssuedToken;

/// Successful login: a signed token plus the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: User,
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a user. Fails with a conflict when the email is taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue an access token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
