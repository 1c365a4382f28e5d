//! Unified error type for Authgate.

use authgate_gate::GateError;
use authgate_protocol::ProtocolError;
use authgate_session::SessionError;
use authgate_transport::TransportError;

use crate::{ApiError, ConfigError};

/// Top-level error wrapping every crate-specific error.
///
/// API calls themselves return [`ApiError`], which keeps the
/// rejected/unrecognized/transport split. This type is for wiring code
/// (building a client, opening a store, a CLI's `main`) that just needs
/// `?` to work across layers.
#[derive(Debug, thiserror::Error)]
pub enum AuthgateError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
