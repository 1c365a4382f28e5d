//! Route table and per-route access rules.

use std::fmt;

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

/// Who may see a route.
///
/// ```text
///              no token          token present
/// Public       render            render
/// Protected    → SignIn          render (token injected)
/// GuestOnly    render            → Home
/// ```
///
/// `GuestOnly` is the protected gate with its polarity flipped: the sign-in
/// and sign-up pages make no sense for someone who is already signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    GuestOnly,
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Every view the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    SignIn,
    SignUp,
    #[default]
    Home,
    Profile,
    Users,
    Circles,
    NotFound,
}

impl Route {
    /// Every route, in menu order.
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Circles,
        Route::Users,
        Route::Profile,
        Route::SignIn,
        Route::SignUp,
        Route::NotFound,
    ];

    /// Parses a URL path. Query strings, fragments, and a trailing slash
    /// are ignored; anything unknown is [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Home,
            "/signin" => Self::SignIn,
            "/signup" => Self::SignUp,
            "/profile" => Self::Profile,
            "/users" => Self::Users,
            "/circles" => Self::Circles,
            _ => Self::NotFound,
        }
    }

    /// The canonical path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SignIn => "/signin",
            Self::SignUp => "/signup",
            Self::Profile => "/profile",
            Self::Users => "/users",
            Self::Circles => "/circles",
            Self::NotFound => "/404",
        }
    }

    /// The access rule for this route.
    pub fn access(&self) -> Access {
        match self {
            Self::Home | Self::Profile | Self::Users | Self::Circles => Access::Protected,
            Self::SignIn | Self::SignUp => Access::GuestOnly,
            Self::NotFound => Access::Public,
        }
    }

    /// Where an unauthenticated visitor to a protected route is sent.
    pub fn sign_in() -> Self {
        Self::SignIn
    }

    /// Where an authenticated visitor to a guest-only route is sent.
    pub fn landing() -> Self {
        Self::Home
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
