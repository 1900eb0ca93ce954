/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum DataApiError {
    /// Missing or blank connection setting, reported at construction time.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Request body or headers could not be built.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response text does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Failure reported by a caller-supplied transport.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl DataApiError {
    /// Wraps an arbitrary transport failure.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// strings: `DataApiError::other("connection reset")`.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }
}
