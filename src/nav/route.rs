//! Logical screens of the marketplace client

use std::fmt;

/// A logical screen position. The guard only distinguishes the login and
/// home routes; everything else is "some other screen".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Listings,
    ListingDetail(i64),
    Bookings,
    Notifications,
    Profile,
    AdminApprovals,
}

impl Route {
    /// Canonical path string for this screen
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Listings => "/listings".to_string(),
            Route::ListingDetail(id) => format!("/listings/{}", id),
            Route::Bookings => "/bookings".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::AdminApprovals => "/admin/approvals".to_string(),
        }
    }

    /// Parse a path string back into a route
    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/login" => Some(Route::Login),
            "/home" | "/" => Some(Route::Home),
            "/listings" => Some(Route::Listings),
            "/bookings" => Some(Route::Bookings),
            "/notifications" => Some(Route::Notifications),
            "/profile" => Some(Route::Profile),
            "/admin/approvals" => Some(Route::AdminApprovals),
            other => {
                let id = other.strip_prefix("/listings/")?;
                id.parse().ok().map(Route::ListingDetail)
            }
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login)
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
