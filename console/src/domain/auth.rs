//! Authentication payloads for the sign-in and sign-up screens.
//!
//! Keep raw input parsing out of adapters by exposing constructors that
//! validate string inputs before anything talks to the auth port.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::is_valid_email;

/// Domain error returned when login or sign-up values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// E-mail was missing or blank.
    EmptyEmail,
    /// E-mail is not a syntactically valid address.
    InvalidEmail,
    /// Password was empty.
    EmptyPassword,
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "Invalid email address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and is a syntactically valid address.
/// - `password` is non-empty; caller-provided whitespace is kept so
///   credential comparisons are not surprising.
///
/// # Examples
/// ```
/// use records_console::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" ana@x.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ana@x.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        if !is_valid_email(normalized) {
            return Err(AuthValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account e-mail.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request: a display name plus login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    credentials: Credentials,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthValidationError::EmptyName);
        }
        let credentials = Credentials::try_from_parts(email, password)?;
        Ok(Self {
            name: name.to_owned(),
            credentials,
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Credentials for the new account.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
