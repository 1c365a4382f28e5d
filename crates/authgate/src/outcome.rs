//! What an API call can come back with.
//!
//! Every call resolves to exactly one [`ApiOutcome`]: the success payload,
//! or one [`ApiError`] variant. The variants keep three situations apart
//! that a caller treats differently:
//!
//! - **Rejected**: the server answered with a status the call knows the
//!   meaning of (`409` on sign-up, `401` on sign-in).
//! - **UnrecognizedStatus**: the server answered, but with a status the
//!   call never registered. The raw code is kept for diagnostics.
//! - **Transport**: no answer at all.

use authgate_protocol::{DispatchError, ProtocolError};
use authgate_transport::TransportError;

/// The result of one API call.
pub type ApiOutcome<T> = Result<T, ApiError>;

/// A failure the server explicitly signalled with a known status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// `409` from the registration endpoint.
    #[error("identifier already taken")]
    IdentifierTaken,

    /// `401` from the authentication endpoint.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// `401` from a bearer-protected endpoint, or no token to send.
    #[error("not authenticated")]
    Unauthenticated,

    /// A registered failure status with no more specific meaning.
    #[error("request rejected with status {0}")]
    Status(u16),
}

impl From<u16> for ApiFailure {
    fn from(status: u16) -> Self {
        Self::Status(status)
    }
}

/// Why an API call did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request with a recognized status.
    #[error("{0}")]
    Rejected(ApiFailure),

    /// The server answered with a status this call doesn't handle.
    #[error("unrecognized status code {0}")]
    UnrecognizedStatus(u16),

    /// A success status arrived with a body that couldn't be decoded.
    #[error("malformed response body (status {status}): {source}")]
    MalformedBody { status: u16, source: ProtocolError },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[source] ProtocolError),
}

impl ApiError {
    /// The classified failure, if this is one.
    pub fn failure(&self) -> Option<ApiFailure> {
        match self {
            Self::Rejected(failure) => Some(*failure),
            _ => None,
        }
    }

    /// Returns `true` if the server never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<DispatchError<ApiFailure>> for ApiError {
    fn from(err: DispatchError<ApiFailure>) -> Self {
        match err {
            DispatchError::Rejected { failure, .. } => Self::Rejected(failure),
            DispatchError::UnrecognizedStatus(status) => Self::UnrecognizedStatus(status),
            DispatchError::MalformedBody { status, source } => {
                Self::MalformedBody { status, source }
            }
        }
    }
}
