//! JSON-RPC access to a Bitcoin-style node endpoint.
//!
//! [`RpcCaller`] is the one reusable operation: send a single JSON-RPC
//! request, get the decoded response body back. [`RpcClient`] implements it
//! over HTTP and additionally offers [`NodeRpc`], a thin typed facade over
//! the handful of node methods the probe flows use. `mock::MockRpc` is an
//! in-process canned endpoint for tests, and [`flows`] holds the sequential
//! probe sequences built on the caller.

pub mod flows;
mod http_adapter;
#[cfg(test)]
pub mod mock;

pub use http_adapter::RpcClient;

use async_trait::async_trait;
use bitcoin::{BlockHash, Txid};

use crate::error::CoreError;

/// A single JSON-RPC exchange: one request out, the decoded response body
/// back verbatim. The body is whatever the endpoint sent; neither the HTTP
/// status nor the `result`/`error` members are interpreted.
#[async_trait]
pub trait RpcCaller: Send + Sync {
    async fn call_raw(
        &self,
        method: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError>;
}

/// The node RPC methods exercised by the probe flows, with their results
/// unwrapped and parsed.
///
/// Implementations handle authentication, transport, and response
/// deserialization internally. Every method maps to exactly one JSON-RPC
/// call; there is no batching and no retrying.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Ask the node wallet for a fresh receive address.
    async fn get_new_address(&self) -> Result<String, CoreError>;

    /// Current chain tip height.
    async fn get_block_count(&self) -> Result<u64, CoreError>;

    /// Mine `nblocks` blocks paying to `address`; returns the new block
    /// hashes in mining order.
    async fn generate_to_address(
        &self,
        nblocks: u64,
        address: &str,
    ) -> Result<Vec<BlockHash>, CoreError>;

    /// Fetch a transaction by txid. The payload is returned verbatim as the
    /// node sent it; no schema is enforced on it.
    async fn get_raw_transaction(&self, txid: &Txid) -> Result<serde_json::Value, CoreError>;

    /// Submit a serialized transaction (hex). Returns the txid the node
    /// accepted it under.
    async fn send_raw_transaction(&self, tx_hex: &str) -> Result<Txid, CoreError>;
}
