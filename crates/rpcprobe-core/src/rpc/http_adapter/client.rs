use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bitcoin::{BlockHash, Txid};
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};

use super::super::{NodeRpc, RpcCaller};
use super::endpoint::{Credentials, Endpoint};
use super::parsing::{parse_block_hashes, parse_string, parse_txid, parse_u64};
use super::protocol::{parse_server_error, RpcRequest, RpcResponse, REQUEST_ID};

/// JSON-RPC 2.0 client over HTTP(S) for Bitcoin Core compatible endpoints.
///
/// One HTTP POST per call, no batching and no retries. The request id is a
/// fixed literal since responses are consumed immediately and never matched
/// back to requests.
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
    auth: Option<Credentials>,
}

impl RpcClient {
    /// Create a new client for an `http://` or `https://` URL.
    ///
    /// Authentication precedence:
    /// 1. explicit `user` + `pass`
    /// 2. cookie file (`username:password`) from `cookie_file`
    /// 3. no auth
    pub fn new(
        connection: &str,
        user: Option<&str>,
        pass: Option<&str>,
        cookie_file: Option<&Path>,
    ) -> Result<Self, CoreError> {
        let endpoint = Endpoint::resolve(connection, user, pass, cookie_file)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client builder uses valid static config");

        Ok(Self {
            client,
            url: endpoint.url,
            auth: endpoint.auth,
        })
    }

    /// Perform one JSON-RPC exchange and return the WHOLE decoded response
    /// body, without inspecting the HTTP status or the `result`/`error`
    /// members. This is the pass-through surface the probe subcommands
    /// print verbatim.
    ///
    /// Fails with [`RpcError::Transport`] when the request never completes
    /// and [`RpcError::Decode`] when the body is not valid JSON.
    pub async fn call_raw(
        &self,
        method: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        debug!(rpc.method = method, rpc.params = params.len(), "rpc call");
        let req = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: &params,
            id: REQUEST_ID,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req);
        if let Some(ref credentials) = self.auth {
            builder = builder.basic_auth(&credentials.user, Some(&credentials.pass));
        }

        let response = builder.send().await.map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %body, "rpc response body");

        let decoded: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            RpcError::Decode {
                message: format!("{e}; body={body}"),
            }
        })?;

        Ok(decoded)
    }

    /// Perform one JSON-RPC exchange and unwrap the `result` member.
    ///
    /// A populated `error` member becomes [`RpcError::Server`]; a body that
    /// is valid JSON but not a JSON-RPC response envelope becomes
    /// [`RpcError::InvalidResponse`].
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let body = self.call_raw(method, params).await?;
        let decoded: RpcResponse = serde_json::from_value(body).map_err(|e| {
            RpcError::InvalidResponse(format!("decode JSON-RPC response envelope: {e}"))
        })?;

        if let Some(err) = decoded.error {
            return Err(parse_server_error(err).into());
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl RpcCaller for RpcClient {
    async fn call_raw(
        &self,
        method: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        RpcClient::call_raw(self, method, params).await
    }
}

#[async_trait]
impl NodeRpc for RpcClient {
    async fn get_new_address(&self) -> Result<String, CoreError> {
        let raw = self.call("getnewaddress", serde_json::Map::new()).await?;
        parse_string(raw, "address")
    }

    async fn get_block_count(&self) -> Result<u64, CoreError> {
        let raw = self.call("getblockcount", serde_json::Map::new()).await?;
        parse_u64(raw, "block count")
    }

    async fn generate_to_address(
        &self,
        nblocks: u64,
        address: &str,
    ) -> Result<Vec<BlockHash>, CoreError> {
        let mut params = serde_json::Map::new();
        params.insert("nblocks".to_owned(), serde_json::json!(nblocks));
        params.insert("address".to_owned(), serde_json::json!(address));

        let raw = self.call("generatetoaddress", params).await?;
        parse_block_hashes(raw)
    }

    async fn get_raw_transaction(&self, txid: &Txid) -> Result<serde_json::Value, CoreError> {
        let mut params = serde_json::Map::new();
        params.insert("txid".to_owned(), serde_json::json!(txid.to_string()));

        self.call("getrawtransaction", params).await
    }

    async fn send_raw_transaction(&self, tx_hex: &str) -> Result<Txid, CoreError> {
        let mut params = serde_json::Map::new();
        params.insert("tx".to_owned(), serde_json::json!(tx_hex));

        let raw = self.call("sendrawtransaction", params).await?;
        parse_txid(raw, "txid")
    }
}
