/// Errors that can occur in the transport layer.
///
/// Every variant means "no HTTP response was received". A response with
/// an unexpected status is not an error at this layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote host could not be reached (DNS, refused, reset).
    #[error("connection failed: {0}")]
    Connect(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request was sent but the exchange failed midway.
    #[error("request failed: {0}")]
    Request(String),

    /// The request itself was malformed (bad URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
