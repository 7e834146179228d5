//! Credential and token adapters.
//!
//! - [`BcryptPasswordHasher`] implements the password hashing port.
//! - [`JwtTokenService`] implements the token port with HS256 JWTs.

mod bcrypt_password_hasher;
mod jwt_token_service;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_token_service::{GENERATED_SECRET_LEN, JwtSecret, JwtTokenService};
