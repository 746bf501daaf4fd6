use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use blend_core::AppConfig;
use clap::{Parser, Subcommand};
use serde_json::json;
use soroban_rpc_client::RpcClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Monitor Blend pool reserves over Soroban RPC")]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "BLEND_CONFIG", default_value = "blend.json")]
    config: PathBuf,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the RPC endpoint and report the latest ledger
    Health,
    /// Load the configured reserves and project their rates
    Reserves {
        /// Unix timestamp to project to; defaults to now
        #[arg(long)]
        at: Option<u64>,
    },
}

/// Debug for every workspace crate, info for dependencies
const LOG_DIRECTIVES: &[&str] = &[
    "blend=debug",
    "pool=debug",
    "soroban_tx=debug",
    "soroban_rpc_client=debug",
    "info",
];

fn env_filter() -> anyhow::Result<EnvFilter> {
    LOG_DIRECTIVES
        .iter()
        .try_fold(EnvFilter::from_default_env(), |filter, directive| {
            Ok(filter.add_directive(directive.parse()?))
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter()?)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let rpc = RpcClient::new(config.network.clone())?;

    let output = match cli.cmd {
        Command::Health => {
            if !rpc.is_online().await {
                anyhow::bail!("{} is not healthy", config.network.rpc_url);
            }
            let latest = rpc.get_latest_ledger().await?;
            json!({ "rpc_url": config.network.rpc_url, "latest_ledger": latest })
        }
        Command::Reserves { at } => {
            let timestamp = match at {
                Some(ts) => ts,
                None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
            };
            reserves(&rpc, &config, timestamp).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn reserves(
    rpc: &RpcClient,
    config: &AppConfig,
    timestamp: u64,
) -> anyhow::Result<serde_json::Value> {
    tracing::info!(
        pool = %config.pool_id,
        reserves = config.reserves.len(),
        timestamp,
        "loading reserves"
    );

    let mut out = Vec::with_capacity(config.reserves.len());
    for asset in &config.reserves {
        let reserve = pool::load_reserve(rpc, config.pool_id.as_str(), asset.as_str())
            .await
            .with_context(|| format!("loading reserve {}", asset))?;
        let estimate = reserve.estimate_data(config.backstop_take_rate, Some(timestamp));
        out.push(json!({
            "asset_id": reserve.asset_id,
            "symbol": reserve.token_metadata.as_ref().map(|m| m.symbol.as_str()),
            "index": reserve.config.index,
            "estimate": estimate,
        }));
    }

    Ok(json!({
        "pool_id": config.pool_id,
        "timestamp": timestamp,
        "reserves": out,
    }))
}
