//! Sequential probe flows composed from single RPC calls.
//!
//! Each flow is a strictly sequential chain: the result extracted from one
//! response may be substituted as a literal parameter into the next request.
//! The decoded response bodies are carried through untouched so callers can
//! surface exactly what the node answered at every step. No concurrency, no
//! retries, no shared state beyond the connection.

use crate::error::CoreError;

use super::RpcCaller;

/// Every response observed while mining blocks to an address.
#[derive(Debug)]
pub struct GenerateOutcome {
    /// Response to the wallet call, absent when the caller supplied an
    /// address of their own.
    pub address_response: Option<serde_json::Value>,
    /// Address the blocks were mined to.
    pub address: String,
    /// `getblockcount` body before mining.
    pub count_before: serde_json::Value,
    /// `generatetoaddress` body.
    pub generate_response: serde_json::Value,
    /// `getblockcount` body after mining.
    pub count_after: serde_json::Value,
}

/// Mine `nblocks` blocks, fetching a fresh address first when none is given.
///
/// Mirrors the manual probe sequence: `getnewaddress` (optional), block
/// count before, `generatetoaddress`, block count after.
pub async fn generate_blocks(
    rpc: &dyn RpcCaller,
    nblocks: u64,
    address: Option<String>,
) -> Result<GenerateOutcome, CoreError> {
    let (address_response, address) = match address {
        Some(address) => (None, address),
        None => {
            let body = rpc.call_raw("getnewaddress", serde_json::Map::new()).await?;
            let address = extract_address(&body)?;
            (Some(body), address)
        }
    };

    let count_before = rpc.call_raw("getblockcount", serde_json::Map::new()).await?;

    let mut params = serde_json::Map::new();
    params.insert("nblocks".to_owned(), serde_json::json!(nblocks));
    params.insert("address".to_owned(), serde_json::json!(address));
    let generate_response = rpc.call_raw("generatetoaddress", params).await?;

    let count_after = rpc.call_raw("getblockcount", serde_json::Map::new()).await?;

    Ok(GenerateOutcome {
        address_response,
        address,
        count_before,
        generate_response,
        count_after,
    })
}

/// The fresh address feeds the next request as a literal parameter, so the
/// body must carry a string `result`.
fn extract_address(body: &serde_json::Value) -> Result<String, CoreError> {
    body.get("result")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            CoreError::InvalidData(format!("expected a string `result` address, got: {body}"))
        })
}
