//! Form-side helpers: input validation, the loading flag, and turning an
//! [`ApiError`] into something to show the user.
//!
//! None of this renders anything. It is the state a sign-up or sign-in
//! form needs so that, whatever happens to the request, the form comes
//! back usable with a message attached.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use authgate_protocol::Credentials;

use crate::{ApiError, ApiFailure, ApiOutcome};

const REQUIRED: &str = "This field is required";
const PASSWORD_MISMATCH: &str = "Password does not match";
const ID_TAKEN: &str = "id is already taken";
const WRONG_CREDENTIALS: &str = "Wrong id or password";
const SESSION_EXPIRED: &str = "Your session has expired, please sign in again";

// ---------------------------------------------------------------------------
// Fields and field errors
// ---------------------------------------------------------------------------

/// An input on a sign-up or sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Id,
    Password,
    ConfirmPassword,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        })
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(ok()) } else { Err(self) }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// The sign-up form's raw inputs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub id: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Checks the inputs and, if they pass, yields the credentials to send.
    ///
    /// # Errors
    /// Every failing field, each with its message. A mismatched
    /// confirmation marks both password fields.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.id.trim().is_empty() {
            errors.insert(Field::Id, REQUIRED);
        }
        if self.password.is_empty() {
            errors.insert(Field::Password, REQUIRED);
        }
        if self.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, REQUIRED);
        }
        if !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password != self.confirm_password
        {
            errors.insert(Field::Password, PASSWORD_MISMATCH);
            errors.insert(Field::ConfirmPassword, PASSWORD_MISMATCH);
        }
        errors.into_result(|| Credentials::new(self.id.trim(), self.password.as_str()))
    }
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm").field("id", &self.id).finish_non_exhaustive()
    }
}

/// The sign-in form's raw inputs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub id: String,
    pub password: String,
}

impl SignInForm {
    /// # Errors
    /// Every empty field.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.id.trim().is_empty() {
            errors.insert(Field::Id, REQUIRED);
        }
        if self.password.is_empty() {
            errors.insert(Field::Password, REQUIRED);
        }
        errors.into_result(|| Credentials::new(self.id.trim(), self.password.as_str()))
    }
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm").field("id", &self.id).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// A message to show after a failed submit.
///
/// Classified failures attach to the input they concern, or sit inline on
/// the form. Unrecognized statuses and transport failures become generic
/// diagnostics, worded differently so the two stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFeedback {
    Field { field: Field, message: String },
    Form(String),
    Diagnostic(String),
}

impl FormFeedback {
    pub fn from_error(err: &ApiError) -> Self {
        match err {
            ApiError::Rejected(ApiFailure::IdentifierTaken) => Self::Field {
                field: Field::Id,
                message: ID_TAKEN.to_string(),
            },
            ApiError::Rejected(ApiFailure::InvalidCredentials) => {
                Self::Form(WRONG_CREDENTIALS.to_string())
            }
            ApiError::Rejected(ApiFailure::Unauthenticated) => {
                Self::Form(SESSION_EXPIRED.to_string())
            }
            ApiError::Rejected(ApiFailure::Status(status)) => {
                Self::Form(format!("Request rejected (status {status})"))
            }
            ApiError::UnrecognizedStatus(status) => {
                Self::Diagnostic(format!("Unknown response from server (status {status})"))
            }
            ApiError::MalformedBody { status, .. } => {
                Self::Diagnostic(format!("Unreadable response from server (status {status})"))
            }
            ApiError::Transport(e) => {
                Self::Diagnostic(format!("Could not reach the server: {e}"))
            }
            ApiError::Encode(e) => Self::Diagnostic(format!("Could not send the request: {e}")),
        }
    }

    /// The text to display.
    pub fn message(&self) -> &str {
        match self {
            Self::Field { message, .. } => message,
            Self::Form(message) | Self::Diagnostic(message) => message,
        }
    }
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Resets the loading flag when dropped, so it clears on every exit path:
/// success, failure, or the submit future being dropped mid-flight.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submission state for one form: whether a request is in flight and the
/// feedback from the last one.
///
/// Concurrent submits are not deduplicated. If two overlap, the flag
/// clears when the first finishes and the feedback is whichever finished
/// last.
#[derive(Debug, Default)]
pub struct FormState {
    loading: AtomicBool,
    feedback: Mutex<Option<FormFeedback>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a submit is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Feedback from the most recent completed submit, if it failed.
    pub fn feedback(&self) -> Option<FormFeedback> {
        self.feedback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs `request` with the loading flag raised, records feedback from
    /// its outcome, and hands the outcome back unchanged.
    pub async fn submit<T, F>(&self, request: F) -> ApiOutcome<T>
    where
        F: Future<Output = ApiOutcome<T>>,
    {
        let _loading = LoadingGuard::engage(&self.loading);
        let outcome = request.await;

        let feedback = outcome.as_ref().err().map(FormFeedback::from_error);
        if let Some(fb) = &feedback {
            tracing::debug!(feedback = fb.message(), "form submit failed");
        }
        *self.feedback.lock().unwrap_or_else(PoisonError::into_inner) = feedback;

        outcome
    }
}
