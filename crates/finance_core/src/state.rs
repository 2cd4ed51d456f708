//! Unidirectional app state: event in, next state out. The reducer is pure;
//! I/O happens in the services and only its outcome flows through here.

use finza_core::{entry_service::WriteOutcome, sync_service::SyncReport};

use crate::session::SessionContext;

/// Navigable surfaces of the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    SignUp,
    Dashboard,
    Transactions,
    AddTransaction,
    EditTransaction(String),
    Reports,
    Assistant,
    Profile,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::SignUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking inline message surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub route: Route,
    pub session: Option<SessionContext>,
    pub notice: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Login,
            session: None,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SessionStarted(SessionContext),
    SessionEnded,
    Navigate(Route),
    EntrySaved(WriteOutcome),
    EntryRejected(String),
    EntryMissing,
    SyncFinished(SyncReport),
    NoticeDismissed,
}

/// Pure state transition. Unauthenticated navigation to a protected route
/// lands on the login screen; a missing entry redirects to the dashboard.
pub fn reduce(state: AppState, event: AppEvent) -> AppState {
    let mut next = state;
    match event {
        AppEvent::SessionStarted(session) => {
            next.session = Some(session);
            next.route = Route::Dashboard;
            next.notice = None;
        }
        AppEvent::SessionEnded => {
            next.session = None;
            next.route = Route::Login;
            next.notice = None;
        }
        AppEvent::Navigate(route) => {
            let authenticated = next
                .session
                .as_ref()
                .map(SessionContext::is_authenticated)
                .unwrap_or(false);
            next.route = if route.requires_auth() && !authenticated {
                Route::Login
            } else {
                route
            };
        }
        AppEvent::EntrySaved(WriteOutcome::Synced { .. }) => {
            next.notice = Some(Notice::info("Saved."));
            next.route = Route::Dashboard;
        }
        AppEvent::EntrySaved(WriteOutcome::SavedLocally) => {
            next.notice = Some(Notice::warning(
                "Offline: saved locally and will sync when the connection returns.",
            ));
            next.route = Route::Dashboard;
        }
        AppEvent::EntryRejected(message) => {
            next.notice = Some(Notice::error(message));
        }
        AppEvent::EntryMissing => {
            next.route = Route::Dashboard;
            next.notice = Some(Notice::info("That entry no longer exists."));
        }
        AppEvent::SyncFinished(report) => {
            if !report.errors.is_empty() {
                next.notice = Some(Notice::warning(format!(
                    "{} pending {} could not sync yet.",
                    report.errors.len(),
                    plural_entries(report.errors.len())
                )));
            } else if report.synced > 0 {
                next.notice = Some(Notice::info(format!(
                    "Synced {} pending {}.",
                    report.synced,
                    plural_entries(report.synced)
                )));
            }
        }
        AppEvent::NoticeDismissed => {
            next.notice = None;
        }
    }
    next
}

fn plural_entries(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}
