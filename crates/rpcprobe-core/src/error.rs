/// Failures of a single JSON-RPC exchange.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The HTTP request never completed (connection refused, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("decode response body: {message}")]
    Decode { message: String },

    /// The server answered with a populated JSON-RPC `error` member.
    #[error("server error {code}: {message}")]
    Server { code: i64, message: String },

    /// The response was JSON but not a usable JSON-RPC response.
    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The caller supplied something unusable before any request was sent
    /// (bad endpoint URL, partial credentials, unreadable cookie file).
    #[error("invalid request setup: {0}")]
    InvalidRequest(String),

    /// A typed facade method got a well-formed response whose `result`
    /// did not have the expected shape.
    #[error("invalid result data: {0}")]
    InvalidData(String),
}
