//! Authentication primitives such as registration and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{EmailAddress, UserName, UserValidationError};

/// Minimum number of characters accepted for a new password.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Longest password accepted, in UTF-8 bytes. bcrypt ignores anything past
/// this, so longer passwords would silently share a hash with their prefix.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Name or email failed validation.
    User(UserValidationError),
    /// Password is shorter than [`PASSWORD_MIN_CHARS`].
    PasswordTooShort { min: usize },
    /// Password is longer than [`PASSWORD_MAX_BYTES`].
    PasswordTooLong { max: usize },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

impl RegistrationValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(UserValidationError::EmptyName) => "name",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "password",
            Self::User(_) => "email",
        }
    }
}

/// Validated sign-up request.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `email` is trimmed and address-shaped.
/// - `password` has at least [`PASSWORD_MIN_CHARS`] characters and at most
///   [`PASSWORD_MAX_BYTES`] bytes; whitespace is kept verbatim.
///
/// # Examples
/// ```
/// use travel_requests::domain::Registration;
///
/// let reg = Registration::try_from_parts("Ada", "ada@example.com", "secret").unwrap();
/// assert_eq!(reg.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = UserName::new(name)?;
        let email = EmailAddress::new(email)?;
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(RegistrationValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// The email is only trimmed, not shape-checked: an unknown or malformed
/// address must fail the same way as a wrong password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ada@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn valid_credentials_trim_email() {
        let creds = LoginCredentials::try_from_parts("  ada@example.com ", " secret ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    #[case("", "ada@example.com", "secret", "name")]
    #[case("Ada", "not-an-email", "secret", "email")]
    #[case("Ada", "", "secret", "email")]
    #[case("Ada", "ada@example.com", "12345", "password")]
    fn invalid_registration_names_field(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(name, email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn six_character_password_is_accepted() {
        let reg = Registration::try_from_parts("Ada", "ada@example.com", "123456")
            .expect("boundary length accepted");
        assert_eq!(reg.password(), "123456");
        assert_eq!(reg.name().as_ref(), "Ada");
    }

    #[rstest]
    #[case("a".repeat(PASSWORD_MAX_BYTES), true)]
    #[case("a".repeat(PASSWORD_MAX_BYTES + 1), false)]
    // 37 two-byte characters: few characters, too many bytes.
    #[case("é".repeat(37), false)]
    fn password_length_is_capped_in_bytes(#[case] password: String, #[case] accepted: bool) {
        let result = Registration::try_from_parts("Ada", "ada@example.com", &password);
        match result {
            Ok(reg) => {
                assert!(accepted);
                assert_eq!(reg.password(), password.as_str());
            }
            Err(err) => {
                assert!(!accepted);
                assert_eq!(
                    err,
                    RegistrationValidationError::PasswordTooLong {
                        max: PASSWORD_MAX_BYTES
                    }
                );
                assert_eq!(err.field(), "password");
            }
        }
    }
}
