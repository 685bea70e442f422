//! Authentication helpers.
//!
//! The identity provider itself is remote; this module maps its error codes
//! to readable messages and runs the password checks done before sign-up.

mod error;

pub use error::AuthError;

use sportswear_store_core::Email;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

impl AuthError {
    /// Map a provider error code to an [`AuthError`].
    ///
    /// Unknown codes keep the provider's message.
    #[must_use]
    pub fn from_provider(code: &str, message: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/too-many-requests" => Self::TooManyRequests,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/requires-recent-login" => Self::RequiresRecentLogin,
            _ => Self::Provider {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    /// The provider code this error was mapped from, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::UserNotFound => Some("auth/user-not-found"),
            Self::WrongPassword => Some("auth/wrong-password"),
            Self::InvalidEmail => Some("auth/invalid-email"),
            Self::TooManyRequests => Some("auth/too-many-requests"),
            Self::EmailAlreadyInUse => Some("auth/email-already-in-use"),
            Self::WeakPassword => Some("auth/weak-password"),
            Self::RequiresRecentLogin => Some("auth/requires-recent-login"),
            Self::Provider { code, .. } => Some(code),
            Self::PasswordPolicy(_) | Self::PasswordMismatch => None,
        }
    }
}

/// Readable message for a provider error code.
#[must_use]
pub fn auth_error_message(code: &str, provider_message: &str) -> String {
    AuthError::from_provider(code, provider_message).to_string()
}

/// Parse a sign-in or sign-up email address.
///
/// # Errors
///
/// Returns `AuthError::InvalidEmail` if the address is malformed.
pub fn parse_email(raw: &str) -> Result<Email, AuthError> {
    Email::parse(raw).map_err(|_| AuthError::InvalidEmail)
}

/// Check a new password against the sign-up rules: minimum length, at
/// least one lowercase letter, one uppercase letter and one digit, and a
/// matching confirmation.
///
/// # Errors
///
/// Returns `AuthError::PasswordPolicy` or `AuthError::PasswordMismatch`.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordPolicy(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(AuthError::PasswordPolicy(
            "Password must contain a lowercase letter, an uppercase letter and a digit"
                .to_string(),
        ));
    }

    if password != confirmation {
        return Err(AuthError::PasswordMismatch);
    }

    Ok(())
}
