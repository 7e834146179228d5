//! HS256 JWT implementation of the `TokenService` port.
//!
//! Claims are `{user_id, email, iat, exp}` with `exp = iat + 24h`. Only HS256
//! is accepted on verification; tokens carrying any other algorithm are
//! rejected before their claims are read. Expiry is checked against the
//! injected clock with zero leeway.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{AccessClaims, IssuedToken, TOKEN_TTL, TokenError, TokenService};
use crate::domain::{EmailAddress, User, UserId};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Length in bytes of a generated signing secret.
pub const GENERATED_SECRET_LEN: usize = 32;

/// Symmetric signing secret. Never printed.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Wrap caller-provided secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random 256-bit secret for development use.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; GENERATED_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(<redacted>)")
    }
}

/// Wire claims. Every field is required, so missing claims fail decoding.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    email: String,
    iat: i64,
    exp: i64,
}

/// Token service signing with a process-wide HS256 secret.
///
/// Rotating the secret invalidates every outstanding token.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &JwtSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the injected clock instead.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
        _ => TokenError::ExpiredOrInvalidSignature,
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0).ok_or(TokenError::Malformed)
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + TOKEN_TTL;
        let claims = Claims {
            user_id: user.id().get(),
            email: user.email().as_ref().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;

        Ok(IssuedToken {
            token,
            claims: AccessClaims {
                user_id: user.id(),
                email: user.email().clone(),
                issued_at: timestamp(claims.iat)?,
                expires_at: timestamp(claims.exp)?,
            },
        })
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| map_decode_error(&err))?;
        let claims = data.claims;

        if self.clock.utc().timestamp() >= claims.exp {
            return Err(TokenError::ExpiredOrInvalidSignature);
        }

        Ok(AccessClaims {
            user_id: UserId::new(claims.user_id).map_err(|_| TokenError::Malformed)?,
            email: EmailAddress::new(claims.email).map_err(|_| TokenError::Malformed)?,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}
