//! Navigation between the four pages and the signed-in session.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Clients,
    Products,
    Orders,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Dashboard, Route::Clients, Route::Products, Route::Orders];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Clients => "/clients",
            Route::Products => "/products",
            Route::Orders => "/orders",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Clients => "Clients",
            Route::Products => "Products",
            Route::Orders => "Orders",
        }
    }

    /// Unknown paths, and `/`, land on the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|route| route.path() == trimmed)
            .unwrap_or_default()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("no active session")]
    SignedOut,
}

/// Page chrome state: the active route and who is signed in.
#[derive(Debug, Default)]
pub struct Shell {
    route: Route,
    session: Option<Session>,
}

impl Shell {
    pub fn sign_in(user: impl Into<String>) -> Self {
        let session = Session {
            user: user.into(),
            started_at: Utc::now(),
        };
        info!(user = %session.user, "Session started");
        Self {
            route: Route::Dashboard,
            session: Some(session),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn navigate(&mut self, path: &str) -> Result<Route, ShellError> {
        if self.session.is_none() {
            return Err(ShellError::SignedOut);
        }
        self.route = Route::from_path(path);
        Ok(self.route)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(user = %session.user, "Session ended");
        }
        self.route = Route::Dashboard;
    }
}
