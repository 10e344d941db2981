use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rpcprobe — fire single JSON-RPC calls at a Bitcoin-style node for manual testing.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Node JSON-RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:1024", env = "RPCPROBE_URL")]
    pub rpc_url: String,

    /// RPC username (must be paired with --rpc-pass).
    #[arg(long, env = "RPCPROBE_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "RPCPROBE_PASS")]
    pub rpc_pass: Option<String>,

    /// Bitcoin-Core-style cookie file containing `username:password`.
    #[arg(long, env = "RPCPROBE_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send one JSON-RPC call and print the raw response body.
    Call {
        /// Method name, e.g. `getblockcount`.
        method: String,

        /// Named parameters as a JSON object, e.g. '{"txid": "..."}'.
        #[arg(default_value = "{}")]
        params: String,
    },

    /// Fetch a fresh wallet address (`getnewaddress`).
    NewAddress,

    /// Print the current chain tip height (`getblockcount`).
    BlockCount,

    /// Mine blocks, fetching a fresh address first unless one is given.
    Generate {
        /// Number of blocks to mine.
        nblocks: u64,

        /// Mine to this address instead of asking the wallet for one.
        #[arg(long)]
        address: Option<String>,
    },

    /// Fetch a transaction by txid (`getrawtransaction`).
    RawTransaction {
        /// Transaction id, hex.
        txid: String,
    },

    /// Submit a serialized transaction (`sendrawtransaction`).
    SendRawTransaction {
        /// Raw transaction, hex.
        tx_hex: String,
    },
}
