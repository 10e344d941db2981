use crate::error::RpcError;

/// Fixed JSON-RPC request id. Responses are never correlated back to
/// requests here (one request, one response, done), so every request
/// carries the same literal id.
pub(super) const REQUEST_ID: u64 = 1;

/// A single JSON-RPC 2.0 request with named parameters.
///
/// Field order matters: it mirrors the wire shape
/// `{"jsonrpc": "2.0", "method": ..., "params": {...}, "id": 1}`.
#[derive(serde::Serialize)]
pub(super) struct RpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    pub(super) params: &'a serde_json::Map<String, serde_json::Value>,
    pub(super) id: u64,
}

/// Permissive JSON-RPC response envelope. A JSON `null` in either member
/// deserializes to `None`, so `"error": null` is treated as no error.
#[derive(serde::Deserialize)]
pub(super) struct RpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a populated JSON-RPC `error` member into a structured [`RpcError`].
///
/// The JSON-RPC spec defines errors as `{"code": <int>, "message": <string>}`.
/// If the value matches that shape we produce `Server`; otherwise we fall
/// back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_server_error(err: serde_json::Value) -> RpcError {
    #[derive(serde::Deserialize)]
    struct ServerError {
        code: i64,
        message: String,
    }

    if let Ok(parsed) = serde_json::from_value::<ServerError>(err.clone()) {
        RpcError::Server {
            code: parsed.code,
            message: parsed.message,
        }
    } else {
        RpcError::InvalidResponse(format!("non-standard JSON-RPC error: {err}"))
    }
}
