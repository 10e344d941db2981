use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bitcoin::hashes::Hash;
use bitcoin::BlockHash;

use crate::error::CoreError;

use super::RpcCaller;

/// In-process stand-in for a node endpoint. Answers [`RpcCaller::call_raw`]
/// with full JSON-RPC envelopes from canned data populated via the builder,
/// and records which addresses blocks were mined to. Unknown methods and
/// exhausted canned data come back as `error` members, the way a real node
/// would answer.
pub struct MockRpc {
    addresses: Mutex<VecDeque<String>>,
    block_count: AtomicU64,
    transactions: HashMap<String, serde_json::Value>,
    accepted_txid: Option<String>,
    mined_to: Mutex<Vec<(u64, String)>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            addresses: VecDeque::new(),
            block_count: 0,
            transactions: HashMap::new(),
            accepted_txid: None,
        }
    }

    /// `(nblocks, address)` pairs recorded by `generatetoaddress` calls,
    /// in call order.
    pub fn mined_to(&self) -> Vec<(u64, String)> {
        self.mined_to.lock().expect("mock lock must not poison").clone()
    }
}

pub struct MockRpcBuilder {
    addresses: VecDeque<String>,
    block_count: u64,
    transactions: HashMap<String, serde_json::Value>,
    accepted_txid: Option<String>,
}

impl MockRpcBuilder {
    /// Queue an address to be handed out by `getnewaddress`.
    pub fn with_address(mut self, address: &str) -> Self {
        self.addresses.push_back(address.to_owned());
        self
    }

    pub fn with_block_count(mut self, count: u64) -> Self {
        self.block_count = count;
        self
    }

    pub fn with_tx(mut self, txid: &str, payload: serde_json::Value) -> Self {
        self.transactions.insert(txid.to_owned(), payload);
        self
    }

    /// Txid that `sendrawtransaction` reports for any submission.
    pub fn with_accepted_txid(mut self, txid: &str) -> Self {
        self.accepted_txid = Some(txid.to_owned());
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            addresses: Mutex::new(self.addresses),
            block_count: AtomicU64::new(self.block_count),
            transactions: self.transactions,
            accepted_txid: self.accepted_txid,
            mined_to: Mutex::new(Vec::new()),
        }
    }
}

fn reply(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"result": result, "error": null, "id": 1})
}

fn reply_error(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "result": null,
        "error": {"code": code, "message": message},
        "id": 1
    })
}

#[async_trait]
impl RpcCaller for MockRpc {
    async fn call_raw(
        &self,
        method: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let body = match method {
            "getnewaddress" => {
                match self
                    .addresses
                    .lock()
                    .expect("mock lock must not poison")
                    .pop_front()
                {
                    Some(address) => reply(serde_json::json!(address)),
                    None => reply_error(-18, "mock wallet has no more addresses"),
                }
            }
            "getblockcount" => reply(serde_json::json!(self.block_count.load(Ordering::SeqCst))),
            "generatetoaddress" => {
                let nblocks = params
                    .get("nblocks")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0);
                let address = params
                    .get("address")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_owned();

                self.block_count.fetch_add(nblocks, Ordering::SeqCst);
                self.mined_to
                    .lock()
                    .expect("mock lock must not poison")
                    .push((nblocks, address));

                let hashes = vec![BlockHash::all_zeros().to_string(); nblocks as usize];
                reply(serde_json::json!(hashes))
            }
            "getrawtransaction" => {
                let txid = params
                    .get("txid")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                match self.transactions.get(txid) {
                    Some(payload) => reply(payload.clone()),
                    None => reply_error(-5, "No such mempool or blockchain transaction"),
                }
            }
            "sendrawtransaction" => match &self.accepted_txid {
                Some(txid) => reply(serde_json::json!(txid)),
                None => reply_error(-26, "mock rejects all submissions"),
            },
            _ => reply_error(-32601, "Method not found"),
        };

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "8c14f0db3df150123e6f3dbbf30f8b955a8249b62ac1d1ff16284aefa3d06d87";

    fn params_with(key: &str, value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        let mut params = serde_json::Map::new();
        params.insert(key.to_owned(), value);
        params
    }

    #[tokio::test]
    async fn canned_transaction_is_returned_in_the_result_member() {
        let payload = serde_json::json!({"txid": TXID, "hex": "deadbeef"});
        let rpc = MockRpc::builder().with_tx(TXID, payload.clone()).build();

        let body = rpc
            .call_raw("getrawtransaction", params_with("txid", serde_json::json!(TXID)))
            .await
            .expect("mock call must succeed");
        assert_eq!(body["result"], payload);
        assert_eq!(body["error"], serde_json::Value::Null);

        let missing = rpc
            .call_raw("getrawtransaction", params_with("txid", serde_json::json!("00")))
            .await
            .expect("mock call must succeed");
        assert_eq!(missing["error"]["code"], serde_json::json!(-5));
    }

    #[tokio::test]
    async fn submission_reports_the_configured_txid() {
        let rpc = MockRpc::builder().with_accepted_txid(TXID).build();

        let body = rpc
            .call_raw(
                "sendrawtransaction",
                params_with("tx", serde_json::json!("0200000001")),
            )
            .await
            .expect("mock call must succeed");
        assert_eq!(body["result"], serde_json::json!(TXID));
    }

    #[tokio::test]
    async fn unknown_method_answers_with_error_member() {
        let rpc = MockRpc::builder().build();

        let body = rpc
            .call_raw("frobnicate", serde_json::Map::new())
            .await
            .expect("mock call must succeed");
        assert_eq!(body["error"]["code"], serde_json::json!(-32601));
        assert_eq!(body["result"], serde_json::Value::Null);
    }
}
