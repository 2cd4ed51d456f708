//! Explicit per-session context. Created at login, dropped at logout;
//! components receive it as an argument instead of reading global state.

use finza_config::Theme;
use finza_core::auth::{AuthClient, AuthSession};
use finza_core::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub user_id: String,
    pub email: String,
    pub auth: AuthStatus,
    pub theme: Theme,
}

impl SessionContext {
    /// Signs in against the provider and materializes the session.
    pub fn login(
        auth: &dyn AuthClient,
        email: &str,
        password: &str,
        theme: Theme,
    ) -> Result<Self, CoreError> {
        let session = auth.sign_in(email, password)?;
        Ok(Self::from_auth(session, theme))
    }

    /// Registers a new account and materializes the session.
    pub fn register(
        auth: &dyn AuthClient,
        email: &str,
        password: &str,
        theme: Theme,
    ) -> Result<Self, CoreError> {
        let session = auth.sign_up(email, password)?;
        Ok(Self::from_auth(session, theme))
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthStatus::SignedIn
    }

    fn from_auth(session: AuthSession, theme: Theme) -> Self {
        Self {
            user_id: session.user_id,
            email: session.email,
            auth: AuthStatus::SignedIn,
            theme,
        }
    }
}
