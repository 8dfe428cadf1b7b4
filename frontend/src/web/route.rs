//! Route table.
//!
//! Pure domain model: paths, guard predicates and redirect targets.
//! No DOM access here, which keeps the guard rules testable.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Public landing page.
    #[default]
    Home,
    Login,
    Signup,
    Feed,
    Explore,
    Profile,
    Insights,
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/feed" => Self::Feed,
            "/explore" => Self::Explore,
            "/profile" => Self::Profile,
            "/insights" => Self::Insights,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Feed => "/feed",
            Self::Explore => "/explore",
            Self::Profile => "/profile",
            Self::Insights => "/insights",
            Self::NotFound => "/",
        }
    }

    /// Protected area: unauthenticated visitors are redirected away.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Feed | Self::Explore | Self::Profile | Self::Insights
        )
    }

    /// Public-only area: authenticated users are redirected away.
    pub fn public_only(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// Where the protected guard sends unauthenticated visitors.
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// Where the public-only guard sends authenticated users.
    pub fn auth_success_redirect() -> Self {
        Self::Feed
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Signup,
            AppRoute::Feed,
            AppRoute::Explore,
            AppRoute::Profile,
            AppRoute::Insights,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        let route = AppRoute::from_path("/no-such-page");
        assert_eq!(route, AppRoute::NotFound);
        assert_eq!(route.to_path(), "/");
    }

    #[test]
    fn guard_partition() {
        // Every protected page redirects signed-out visitors to login.
        for route in [
            AppRoute::Feed,
            AppRoute::Explore,
            AppRoute::Profile,
            AppRoute::Insights,
        ] {
            assert!(route.requires_auth());
            assert!(!route.public_only());
        }

        // Login/signup are public-only and send signed-in users to the feed.
        for route in [AppRoute::Login, AppRoute::Signup] {
            assert!(route.public_only());
            assert!(!route.requires_auth());
        }

        // The landing page belongs to neither area.
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Home.public_only());

        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Feed);
    }
}
