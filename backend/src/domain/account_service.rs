//! Account domain service.
//!
//! Implements the registration and login driving ports over the credential
//! store, the password hasher and the token service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginOutcome, LoginService, PasswordHashError, PasswordHasher, RegistrationService,
    TokenError, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Error, LoginCredentials, NewUser, Registration, User};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

fn email_taken() -> Error {
    Error::conflict("email already registered")
}

/// Account service implementing [`RegistrationService`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create a new account service.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl<R> RegistrationService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;

        // The unique index still guards against a concurrent sign-up.
        let user = self
            .users
            .insert(&NewUser {
                name: registration.name().clone(),
                email: registration.email().clone(),
                password_hash,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            info!("login rejected: malformed email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let Some(stored) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            info!(email = %email, "login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            warn!(email = %email, "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(&stored.user).map_err(map_token_error)?;
        info!(user_id = %stored.user.id(), "login succeeded");
        Ok(LoginOutcome {
            token,
            user: stored.user,
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
