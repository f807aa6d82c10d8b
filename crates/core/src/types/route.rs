//! Client-visible routes.

use core::{fmt, str::FromStr};

/// A page the browser can navigate to.
///
/// Guards and mutation flows only ever navigate to one of these, so
/// redirect targets are checked at compile time instead of being loose
/// strings scattered through handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page (`/`).
    Home,
    /// Login form (`/login`).
    Login,
    /// Two-step registration (`/register`).
    Register,
    /// Account dashboard (`/dashboard`).
    Dashboard,
    /// Profile and store management (`/profile`).
    Profile,
}

impl Route {
    /// Returns the URL path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
        }
    }
}

/// A route name that does not match any [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Parses the bare route name (`"login"`, not `"/login"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "dashboard" => Ok(Self::Dashboard),
            "profile" => Ok(Self::Profile),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
