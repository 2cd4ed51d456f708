//! finance_core
//!
//! Facade over the FINZA engine crates: explicit session lifecycle, a
//! unidirectional app-state reducer, and the wiring that hands the sync,
//! metrics, and assistant services their shared boundary clients.

pub mod api;
pub mod session;
pub mod state;

pub use api::FinzaApp;
pub use session::{AuthStatus, SessionContext};
pub use state::{reduce, AppEvent, AppState, Notice, NoticeLevel, Route};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("finance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("finance core tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
