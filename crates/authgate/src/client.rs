//! The API client: named operations against the REST endpoint.
//!
//! Each operation follows the same shape:
//!   1. Build the request (encode the body, attach the bearer token)
//!   2. Send it, exactly once, no retries
//!   3. Classify the response with a per-call [`DispatchTable`]
//!   4. On success, apply the operation's side effect (if any)
//!
//! The only side effect any operation has besides the request itself is
//! `authenticate` writing the session token, and `sign_out` clearing it.

use std::fmt;

use authgate_protocol::{
    status, AccessTokenBody, Codec, Credentials, DispatchTable, JsonCodec, ProtocolError,
    UserProfile,
};
use authgate_session::{SessionStore, SessionToken};
use authgate_transport::{HttpRequest, HttpTransport};

use crate::{ApiError, ApiFailure, ApiOutcome};

/// Registration endpoint, relative to the configured endpoint.
pub const USERS_PATH: &str = "/users";
/// Authentication endpoint.
pub const AUTH_PATH: &str = "/auth";
/// Current-user endpoint (bearer-protected).
pub const CURRENT_USER_PATH: &str = "/user";

/// Client for the sign-up / sign-in API.
///
/// Generic over the transport (so tests can script responses), the
/// session store (so the token can live in memory or on disk), and the
/// body codec.
///
/// Every request is built from the one `endpoint` given at construction.
/// There is no per-operation URL override.
#[derive(Clone)]
pub struct ApiClient<T, S, C = JsonCodec> {
    endpoint: String,
    transport: T,
    store: S,
    codec: C,
}

// Stores and transports are often trait objects with no `Debug`.
impl<T, S, C> fmt::Debug for ApiClient<T, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl<T, S> ApiClient<T, S, JsonCodec>
where
    T: HttpTransport,
    S: SessionStore,
{
    /// Creates a JSON client for `endpoint` (e.g. `http://localhost:5000/api`).
    pub fn new(endpoint: &str, transport: T, store: S) -> Self {
        Self::with_codec(endpoint, transport, store, JsonCodec)
    }
}

impl<T, S, C> ApiClient<T, S, C>
where
    T: HttpTransport,
    S: SessionStore,
    C: Codec + Clone,
{
    /// Creates a client with a custom body codec.
    pub fn with_codec(endpoint: &str, transport: T, store: S, codec: C) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            transport,
            store,
            codec,
        }
    }

    /// The endpoint every request is built from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The store `authenticate` writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Creates an account.
    ///
    /// - `201` → `Ok(())`
    /// - `409` → [`ApiFailure::IdentifierTaken`]
    ///
    /// Never touches the session store.
    pub async fn register(&self, identifier: &str, secret: &str) -> ApiOutcome<()> {
        let table: DispatchTable<(), ApiFailure> = DispatchTable::builder()
            .on_success(status::CREATED)
            .on_failure_with(status::CONFLICT, |_| ApiFailure::IdentifierTaken)
            .build();

        let body = self
            .codec
            .encode(&Credentials::new(identifier, secret))
            .map_err(ApiError::Encode)?;
        let response = self
            .transport
            .send(HttpRequest::post_json(self.url(USERS_PATH), body))
            .await?;

        match table.dispatch(&response) {
            Ok(()) => {
                tracing::info!(identifier, "account registered");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(identifier, status = response.status, error = %e, "registration failed");
                Err(e.into())
            }
        }
    }

    /// Signs in and stores the returned session token.
    ///
    /// - `200` with `{access_token}` → token written to the store, `Ok(())`
    /// - `401` → [`ApiFailure::InvalidCredentials`], store untouched
    ///
    /// The store is written only after the response is fully decoded, so
    /// a failed call of any kind leaves the previous session as it was.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> ApiOutcome<()> {
        let codec = self.codec.clone();
        let table: DispatchTable<SessionToken, ApiFailure> = DispatchTable::builder()
            .on_success_with(status::OK, move |res| {
                let body: AccessTokenBody = codec.decode(&res.body)?;
                if body.access_token.is_empty() {
                    return Err(ProtocolError::InvalidMessage("empty access_token".into()));
                }
                Ok(SessionToken::new(body.access_token))
            })
            .on_failure_with(status::UNAUTHORIZED, |_| ApiFailure::InvalidCredentials)
            .build();

        let body = self
            .codec
            .encode(&Credentials::new(identifier, secret))
            .map_err(ApiError::Encode)?;
        let response = self
            .transport
            .send(HttpRequest::post_json(self.url(AUTH_PATH), body))
            .await?;

        match table.dispatch(&response) {
            Ok(token) => {
                self.store.set(token);
                tracing::info!(identifier, "authenticated");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(identifier, status = response.status, error = %e, "authentication failed");
                Err(e.into())
            }
        }
    }

    /// Fetches the profile of the signed-in user.
    ///
    /// With no stored token this fails with
    /// [`ApiFailure::Unauthenticated`] without sending anything.
    ///
    /// - `200` with `{id}` → the profile
    /// - `401` → [`ApiFailure::Unauthenticated`]
    ///
    /// A `401` does not clear the stored token; signing out stays an
    /// explicit decision of the caller.
    pub async fn current_user(&self) -> ApiOutcome<UserProfile> {
        let Some(token) = self.store.get() else {
            return Err(ApiError::Rejected(ApiFailure::Unauthenticated));
        };

        let codec = self.codec.clone();
        let table: DispatchTable<UserProfile, ApiFailure> = DispatchTable::builder()
            .on_success_with(status::OK, move |res| codec.decode(&res.body))
            .on_failure_with(status::UNAUTHORIZED, |_| ApiFailure::Unauthenticated)
            .build();

        let request = HttpRequest::get(self.url(CURRENT_USER_PATH)).bearer(token.as_str());
        let response = self.transport.send(request).await?;

        table.dispatch(&response).map_err(|e| {
            tracing::debug!(status = response.status, error = %e, "profile fetch failed");
            e.into()
        })
    }

    /// Forgets the stored session token. Purely local; the server is not
    /// told.
    pub fn sign_out(&self) {
        self.store.clear();
        tracing::info!("signed out");
    }
}
