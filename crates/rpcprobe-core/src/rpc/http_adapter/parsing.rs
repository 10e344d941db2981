use bitcoin::{BlockHash, Txid};

use crate::error::CoreError;

pub(super) fn parse_string(value: serde_json::Value, field: &str) -> Result<String, CoreError> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        other => Err(CoreError::InvalidData(format!(
            "expected string {field}, got: {other}"
        ))),
    }
}

pub(super) fn parse_u64(value: serde_json::Value, field: &str) -> Result<u64, CoreError> {
    value
        .as_u64()
        .ok_or_else(|| CoreError::InvalidData(format!("expected unsigned integer {field}")))
}

pub(super) fn parse_txid(value: serde_json::Value, field: &str) -> Result<Txid, CoreError> {
    parse_string(value, field)?
        .parse()
        .map_err(|e| CoreError::InvalidData(format!("invalid {field}: {e}")))
}

pub(super) fn parse_block_hashes(value: serde_json::Value) -> Result<Vec<BlockHash>, CoreError> {
    let hashes = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(CoreError::InvalidData(format!(
                "expected array of block hashes, got: {other}"
            )))
        }
    };

    hashes
        .into_iter()
        .map(|item| {
            parse_string(item, "block hash")?
                .parse()
                .map_err(|e| CoreError::InvalidData(format!("invalid block hash: {e}")))
        })
        .collect()
}
