//! Status-code dispatch: turning an `HttpResponse` into a typed result.
//!
//! Every API call declares, at its call site, which status codes mean
//! success and which mean a known failure:
//!
//! ```rust
//! use authgate_protocol::{status, DispatchError, DispatchTable};
//! use authgate_transport::HttpResponse;
//!
//! let table: DispatchTable<(), u16> = DispatchTable::builder()
//!     .on_success(status::CREATED)
//!     .on_failure(status::CONFLICT)
//!     .build();
//!
//! assert!(table.dispatch(&HttpResponse::empty(201)).is_ok());
//! assert!(matches!(
//!     table.dispatch(&HttpResponse::empty(418)),
//!     Err(DispatchError::UnrecognizedStatus(418))
//! ));
//! ```
//!
//! The lookup, the transform call, and the uniform failure on unregistered
//! codes live here once instead of as an if/else chain in every call.

use std::collections::HashMap;
use std::fmt;

use authgate_transport::HttpResponse;

use crate::ProtocolError;

type SuccessFn<T> = Box<dyn Fn(&HttpResponse) -> Result<T, ProtocolError> + Send + Sync>;
type FailureFn<E> = Box<dyn Fn(&HttpResponse) -> E + Send + Sync>;

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Why a dispatched response did not produce a success value.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    /// The status was registered as a failure; `failure` is the
    /// descriptor its transform produced.
    #[error("request rejected with status {status}: {failure}")]
    Rejected { status: u16, failure: E },

    /// The status matched neither mapping.
    #[error("unrecognized status code {0}")]
    UnrecognizedStatus(u16),

    /// The status was registered as a success, but its transform could
    /// not make sense of the body.
    #[error("malformed response body (status {status}): {source}")]
    MalformedBody { status: u16, source: ProtocolError },
}

impl<E> DispatchError<E> {
    /// The status code that produced this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Rejected { status, .. } | Self::MalformedBody { status, .. } => *status,
            Self::UnrecognizedStatus(status) => *status,
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchTableBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`DispatchTable`].
///
/// Registering the same status twice in one mapping replaces the earlier
/// transform.
pub struct DispatchTableBuilder<T, E> {
    success: HashMap<u16, SuccessFn<T>>,
    failure: HashMap<u16, FailureFn<E>>,
}

impl<T: 'static, E: 'static> DispatchTableBuilder<T, E> {
    /// Creates a builder with no registered statuses.
    pub fn new() -> Self {
        Self {
            success: HashMap::new(),
            failure: HashMap::new(),
        }
    }

    /// Registers `status` as a success carrying no payload
    /// (`T::default()`, usually `()`).
    pub fn on_success(self, status: u16) -> Self
    where
        T: Default,
    {
        self.on_success_with(status, |_| Ok(T::default()))
    }

    /// Registers `status` as a success whose payload is produced by
    /// `transform`.
    pub fn on_success_with<F>(mut self, status: u16, transform: F) -> Self
    where
        F: Fn(&HttpResponse) -> Result<T, ProtocolError> + Send + Sync + 'static,
    {
        self.success.insert(status, Box::new(transform));
        self
    }

    /// Registers `status` as a failure whose descriptor carries just the
    /// status code (`E::from(status)`).
    pub fn on_failure(self, status: u16) -> Self
    where
        E: From<u16>,
    {
        self.on_failure_with(status, move |_| E::from(status))
    }

    /// Registers `status` as a failure whose descriptor is produced by
    /// `transform`.
    pub fn on_failure_with<F>(mut self, status: u16, transform: F) -> Self
    where
        F: Fn(&HttpResponse) -> E + Send + Sync + 'static,
    {
        self.failure.insert(status, Box::new(transform));
        self
    }

    /// Freezes the mappings.
    pub fn build(self) -> DispatchTable<T, E> {
        DispatchTable {
            success: self.success,
            failure: self.failure,
        }
    }
}

impl<T: 'static, E: 'static> Default for DispatchTableBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// DispatchTable
// ---------------------------------------------------------------------------

/// An immutable status-code → outcome mapping for one logical API call.
///
/// Lookup order is success first, then failure, so a status registered
/// in both (a mistake, but a harmless one) succeeds. Anything registered
/// in neither is [`DispatchError::UnrecognizedStatus`], never a silent
/// success.
pub struct DispatchTable<T, E> {
    success: HashMap<u16, SuccessFn<T>>,
    failure: HashMap<u16, FailureFn<E>>,
}

impl<T: 'static, E: 'static> DispatchTable<T, E> {
    /// Starts building a table.
    pub fn builder() -> DispatchTableBuilder<T, E> {
        DispatchTableBuilder::new()
    }

    /// Classifies `response` by its status code.
    ///
    /// # Errors
    /// - [`DispatchError::Rejected`]: the status is a registered failure
    /// - [`DispatchError::UnrecognizedStatus`]: the status is unregistered
    /// - [`DispatchError::MalformedBody`]: a success transform failed
    pub fn dispatch(&self, response: &HttpResponse) -> Result<T, DispatchError<E>> {
        let status = response.status;

        if let Some(transform) = self.success.get(&status) {
            tracing::debug!(status, "dispatching to success transform");
            return transform(response)
                .map_err(|source| DispatchError::MalformedBody { status, source });
        }

        if let Some(transform) = self.failure.get(&status) {
            tracing::debug!(status, "dispatching to failure transform");
            return Err(DispatchError::Rejected {
                status,
                failure: transform(response),
            });
        }

        tracing::debug!(status, "status not registered");
        Err(DispatchError::UnrecognizedStatus(status))
    }

    /// Returns `true` if `status` is registered in either mapping.
    pub fn handles(&self, status: u16) -> bool {
        self.success.contains_key(&status) || self.failure.contains_key(&status)
    }
}

impl<T, E> fmt::Debug for DispatchTable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut success: Vec<u16> = self.success.keys().copied().collect();
        let mut failure: Vec<u16> = self.failure.keys().copied().collect();
        success.sort_unstable();
        failure.sort_unstable();
        f.debug_struct("DispatchTable")
            .field("success", &success)
            .field("failure", &failure)
            .finish()
    }
}
