//! Credentials presented by HTTP basic authentication.
//!
//! Inbound adapters decode the header and build [`LoginCredentials`] before
//! talking to the [`LoginService`](super::ports::LoginService) port.

use zeroize::Zeroizing;

/// Domain error returned when credential values are unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was empty.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` and `password` are non-empty.
/// - Both keep caller-provided whitespace; stored credentials are compared
///   verbatim.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("somchai", "s3cret").expect("valid");
/// assert_eq!(creds.username(), "somchai");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username to compare against the stored document.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
