//! Authentication error types.

use thiserror::Error;

/// Errors reported by the identity provider or by local credential checks.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// `auth/user-not-found`
    #[error("No account found with this email address")]
    UserNotFound,

    /// `auth/wrong-password`
    #[error("Incorrect password")]
    WrongPassword,

    /// `auth/invalid-email`
    #[error("Invalid email address")]
    InvalidEmail,

    /// `auth/too-many-requests`
    #[error("Too many attempts. Please try again later")]
    TooManyRequests,

    /// `auth/email-already-in-use`
    #[error("This email address is already in use")]
    EmailAlreadyInUse,

    /// `auth/weak-password`
    #[error("Password is too weak")]
    WeakPassword,

    /// `auth/requires-recent-login`
    #[error("Please sign in again to complete this action")]
    RequiresRecentLogin,

    /// Password rejected before reaching the provider.
    #[error("{0}")]
    PasswordPolicy(String),

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Any other provider error; carries the provider's own message.
    #[error("{message}")]
    Provider { code: String, message: String },
}
