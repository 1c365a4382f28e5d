//! End-to-end: a real HTTP server, the reqwest transport, the file-backed
//! session, and the gate, all wired up from a `ClientConfig`.
//!
//! The server is a small axum app that behaves like the API the client
//! targets: `/users` registers, `/auth` hands out tokens, `/user` answers
//! only to a valid bearer token.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use authgate::{
    ApiError, ApiFailure, AuthGate, ClientConfig, FormFeedback, FormState, Navigator, Route,
    SessionStore, SignUpForm,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Deserialize)]
struct Creds {
    id: String,
    password: String,
}

#[derive(Default)]
struct Accounts {
    passwords: HashMap<String, String>,
    tokens: HashMap<String, String>,
}

type Shared = Arc<Mutex<Accounts>>;

async fn register(State(db): State<Shared>, Json(creds): Json<Creds>) -> StatusCode {
    let mut db = db.lock().unwrap();
    if db.passwords.contains_key(&creds.id) {
        return StatusCode::CONFLICT;
    }
    db.passwords.insert(creds.id, creds.password);
    StatusCode::CREATED
}

async fn auth(State(db): State<Shared>, Json(creds): Json<Creds>) -> Response {
    let mut db = db.lock().unwrap();
    if db.passwords.get(&creds.id) != Some(&creds.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"message": "Wrong id or password"})),
        )
            .into_response();
    }
    let token = format!("token-for-{}", creds.id);
    db.tokens.insert(token.clone(), creds.id);
    Json(serde_json::json!({"access_token": token})).into_response()
}

async fn me(State(db): State<Shared>, headers: HeaderMap) -> Response {
    let db = db.lock().unwrap();
    let user = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| db.tokens.get(token));
    match user {
        Some(id) => Json(serde_json::json!({"id": id})).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Serves the mock API on 127.0.0.1:0 and returns its `/api` base URL.
async fn serve() -> String {
    let app = Router::new()
        .route("/api/users", post(register))
        .route("/api/auth", post(auth))
        .route("/api/user", get(me))
        .with_state(Shared::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn test_sign_up_sign_in_and_browse() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new()
        .endpoint(serve().await)
        .timeout(Duration::from_secs(5))
        .session_file(dir.path().join("session.json"));
    let client = config.build_client().unwrap();

    // Sign up, then try the same id again.
    client.register("alice", "pw").await.unwrap();
    let taken = client.register("alice", "other").await.unwrap_err();
    assert_eq!(taken.failure(), Some(ApiFailure::IdentifierTaken));
    assert!(!client.store().has());

    // Wrong password, then right.
    let wrong = client.authenticate("alice", "nope").await.unwrap_err();
    assert_eq!(wrong.failure(), Some(ApiFailure::InvalidCredentials));
    assert!(!client.store().has());

    client.authenticate("alice", "pw").await.unwrap();
    assert_eq!(client.current_user().await.unwrap().id, "alice");

    // The gate sees the new session right away.
    let mut nav = Navigator::new(AuthGate::new(client.store().clone()), "/signin");
    assert_eq!(nav.current(), Route::Home);
    nav.navigate("/profile");
    assert_eq!(nav.current(), Route::Profile);

    // Signing out bounces the user off the protected page.
    client.sign_out();
    assert_eq!(nav.refresh().resolved(), Route::SignIn);
    let err = client.current_user().await.unwrap_err();
    assert_eq!(err.failure(), Some(ApiFailure::Unauthenticated));
}

#[tokio::test]
async fn test_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new()
        .endpoint(serve().await)
        .session_file(dir.path().join("jar/session.json"));

    let first = config.build_client().unwrap();
    first.register("bob", "pw").await.unwrap();
    first.authenticate("bob", "pw").await.unwrap();
    drop(first);

    let second = config.build_client().unwrap();
    assert_eq!(second.current_user().await.unwrap().id, "bob");
}

#[tokio::test]
async fn test_sign_up_form_reports_taken_id() {
    let client = ClientConfig::new()
        .endpoint(serve().await)
        .build_client()
        .unwrap();
    client.register("carol", "pw").await.unwrap();

    let form = SignUpForm {
        id: "carol".into(),
        password: "pw".into(),
        confirm_password: "pw".into(),
    };
    let creds = form.validate().unwrap();
    let state = FormState::new();

    let outcome = state
        .submit(client.register(&creds.identifier, &creds.secret))
        .await;

    assert!(outcome.is_err());
    assert!(!state.is_loading());
    assert_eq!(
        state.feedback().map(|f| f.message().to_string()),
        Some("id is already taken".to_string())
    );
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ClientConfig::new()
        .endpoint(format!("http://{addr}/api"))
        .timeout(Duration::from_secs(2))
        .build_client()
        .unwrap();

    let err = client.authenticate("dave", "pw").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(matches!(
        FormFeedback::from_error(&err),
        FormFeedback::Diagnostic(_)
    ));
    assert!(!client.store().has());
}
