//! # Authgate
//!
//! Sign-up, sign-in, and session-gated navigation against a REST API.
//!
//! The client talks to three endpoints under one configured base URL:
//!
//! | Call                          | Request              | Success | Classified failure |
//! |-------------------------------|----------------------|---------|--------------------|
//! | [`ApiClient::register`]       | `POST /users`        | `201`   | `409` id taken     |
//! | [`ApiClient::authenticate`]   | `POST /auth`         | `200`   | `401` wrong creds  |
//! | [`ApiClient::current_user`]   | `GET /user` (bearer) | `200`   | `401`              |
//!
//! A successful `authenticate` stores the returned token in a
//! [`SessionStore`]; the [`AuthGate`] reads that same store to decide
//! which routes render.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authgate::prelude::*;
//!
//! # async fn run() -> Result<(), AuthgateError> {
//! let client = ClientConfig::from_env()?.build_client()?;
//! client.authenticate("alice", "correct horse").await?;
//!
//! let mut nav = Navigator::new(AuthGate::new(client.store().clone()), "/signin");
//! assert_eq!(nav.refresh().resolved(), Route::Home);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod forms;
mod logging;
mod outcome;

pub use client::{ApiClient, AUTH_PATH, CURRENT_USER_PATH, USERS_PATH};
pub use config::{ClientConfig, ConfigError, ENDPOINT_VAR, SESSION_FILE_VAR, TIMEOUT_VAR};
pub use error::AuthgateError;
pub use forms::{Field, FieldErrors, FormFeedback, FormState, SignInForm, SignUpForm};
pub use logging::{init_tracing, init_tracing_with};
pub use outcome::{ApiError, ApiFailure, ApiOutcome};

pub use authgate_gate::{Access, AuthGate, GateDecision, GateError, GateState, Guarded, Navigator, Route};
pub use authgate_protocol::{
    status, Codec, Credentials, DispatchError, DispatchTable, JsonCodec, ProtocolError,
    UserProfile,
};
pub use authgate_session::{
    FileSessionStore, MemorySessionStore, SessionConfig, SessionError, SessionStore, SessionToken,
};
pub use authgate_transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError,
};

pub mod prelude {
    pub use crate::{
        ApiClient, ApiError, ApiFailure, ApiOutcome, AuthGate, AuthgateError, ClientConfig,
        FileSessionStore, FormFeedback, FormState, GateDecision, MemorySessionStore, Navigator,
        Route, SessionStore, SessionToken, SignInForm, SignUpForm, UserProfile,
    };
}
