mod cli;

use clap::Parser;
use eyre::{eyre, WrapErr};

use rpcprobe_core::rpc::{flows, RpcClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_level(true)
        // stdout carries only the decoded responses; logs go to stderr.
        .with_writer(std::io::stderr)
        .init();

    let rpc = RpcClient::new(
        &args.rpc_url,
        args.rpc_user.as_deref(),
        args.rpc_pass.as_deref(),
        args.rpc_cookie_file.as_deref(),
    )
    .wrap_err("while setting up the RPC connection")?;
    tracing::debug!(url = %args.rpc_url, "probing node");

    match args.command {
        cli::Command::Call { method, params } => {
            let params = parse_params(&params)?;
            print_json(&rpc.call_raw(&method, params).await?)?;
        }
        cli::Command::NewAddress => {
            print_json(&rpc.call_raw("getnewaddress", serde_json::Map::new()).await?)?;
        }
        cli::Command::BlockCount => {
            print_json(&rpc.call_raw("getblockcount", serde_json::Map::new()).await?)?;
        }
        cli::Command::Generate { nblocks, address } => {
            let outcome = flows::generate_blocks(&rpc, nblocks, address).await?;
            // Each step's decoded response body, labeled, in call order.
            match &outcome.address_response {
                Some(body) => println!("Address: {body}"),
                None => println!("Address: {}", outcome.address),
            }
            println!("Block count: {}", outcome.count_before);
            println!("Generate to address: {}", outcome.generate_response);
            println!("Block count: {}", outcome.count_after);
        }
        cli::Command::RawTransaction { txid } => {
            let mut params = serde_json::Map::new();
            params.insert("txid".to_owned(), serde_json::json!(txid));
            print_json(&rpc.call_raw("getrawtransaction", params).await?)?;
        }
        cli::Command::SendRawTransaction { tx_hex } => {
            let mut params = serde_json::Map::new();
            params.insert("tx".to_owned(), serde_json::json!(tx_hex));
            print_json(&rpc.call_raw("sendrawtransaction", params).await?)?;
        }
    }

    Ok(())
}

fn parse_params(raw: &str) -> eyre::Result<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).wrap_err("params must be valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(eyre!("params must be a JSON object, got: {other}")),
    }
}

fn print_json(value: &serde_json::Value) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
