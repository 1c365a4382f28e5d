//! Codec trait and implementations for request and response bodies.
//!
//! The client never calls `serde_json` directly. It goes through a
//! [`Codec`], so the body format can change without touching the
//! call sites that build requests or dispatch responses.

use authgate_transport::HttpResponse;
use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust values into request bodies and decodes response bodies.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value
/// owns its data, so the response buffer can be dropped right after.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`), the format the REST API
/// speaks.
///
/// ## Example
///
/// ```rust
/// use authgate_protocol::{Codec, Credentials, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Credentials::new("alice", "pw")).unwrap();
/// let json: serde_json::Value = codec.decode(&bytes).unwrap();
/// assert_eq!(json["id"], "alice");
/// assert_eq!(json["password"], "pw");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

/// Decodes a response body as JSON.
///
/// Shaped to slot straight into
/// [`DispatchTableBuilder::on_success_with`](crate::DispatchTableBuilder::on_success_with).
#[cfg(feature = "json")]
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ProtocolError> {
    JsonCodec.decode(&response.body)
}
