//! Boundary to the hosted authentication provider.

use crate::CoreError;

/// Credentials confirmed by the provider after sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
}

/// Email/password authentication against the hosted provider.
pub trait AuthClient: Send + Sync {
    fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, CoreError>;
    fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, CoreError>;
}

/// Maps the provider's error codes to user-presentable text. Unrecognized
/// codes pass through labeled as provider errors.
pub fn auth_error_message(code: &str) -> String {
    match code.trim() {
        "EMAIL_EXISTS" => "This email address is already registered.".into(),
        "EMAIL_NOT_FOUND" => "This email address is not registered.".into(),
        "INVALID_PASSWORD" => "Incorrect password.".into(),
        "USER_DISABLED" => "This account has been disabled.".into(),
        code if code.starts_with("WEAK_PASSWORD") => {
            "Password must be at least 6 characters.".into()
        }
        other => format!("Provider error: {other}"),
    }
}
