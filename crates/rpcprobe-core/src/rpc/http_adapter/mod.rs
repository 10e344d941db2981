//! Native JSON-RPC client for Bitcoin Core compatible endpoints.
//!
//! Implements [`NodeRpc`](super::NodeRpc) over JSON-RPC 2.0 using `reqwest`,
//! with HTTP transport, optional basic auth (explicit credentials or a
//! Bitcoin-Core-style cookie file), and one request per call.

mod client;
mod endpoint;
mod parsing;
mod protocol;

pub use client::RpcClient;
