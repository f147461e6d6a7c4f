//! CLI for inspecting the network registry
//!
//! Lists the registered networks and classifies magic values the same way
//! address and extended-key parsers do.

use anyhow::Context;
use clap::{Parser, Subcommand};
use emc2_params::{Registry, RegistryConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "params-inspect")]
#[command(about = "Einsteinium network parameter inspector", long_about = None)]
struct Cli {
    /// JSON registry config with custom networks
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered networks and their magic values
    List,

    /// Show deployments and checkpoints of one network
    Show {
        /// Network name (e.g. mainnet, regtest)
        name: String,
    },

    /// Classify an address version byte
    ClassifyByte {
        /// Byte value, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_byte)]
        byte: u8,
    },

    /// Check whether a string is a known segwit address prefix
    Bech32Prefix {
        /// Human-readable part including the trailing '1'
        prefix: String,
    },

    /// Map an HD private key magic to its public magic
    HdPublic {
        /// Private magic as hex (e.g. 0488ade4)
        id: String,
    },
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid byte {s:?}: {e}"))
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let registry = load_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::List => list(&registry),
        Commands::Show { name } => show(&registry, &name)?,
        Commands::ClassifyByte { byte } => classify_byte(&registry, byte),
        Commands::Bech32Prefix { prefix } => {
            let known = registry.is_bech32_segwit_prefix(&prefix);
            println!("{prefix}: {}", if known { "known" } else { "unknown" });
        }
        Commands::HdPublic { id } => {
            let bytes = hex::decode(id.trim_start_matches("0x"))
                .with_context(|| format!("invalid hex {id:?}"))?;
            let public = registry.hd_private_key_to_public_key_id(&bytes)?;
            println!("{public}");
        }
    }

    Ok(())
}

fn load_registry(config: Option<&std::path::Path>) -> anyhow::Result<Registry> {
    let Some(path) = config else {
        return Ok(Registry::with_default_networks());
    };

    info!("Loading networks from {}", path.display());
    let config = RegistryConfig::from_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    Ok(config.build_registry()?)
}

fn list(registry: &Registry) {
    println!(
        "{:<12} {:<12} {:<8} {:>5} {:>5} {:<10} {:<10}",
        "name", "net", "hrp", "p2pkh", "p2sh", "hd-priv", "hd-pub"
    );
    for params in registry.networks() {
        println!(
            "{:<12} {:<12} {:<8} {:>#5x} {:>#5x} {:<10} {:<10}",
            params.name,
            params.net.to_string(),
            params.bech32_hrp_segwit,
            params.pub_key_hash_addr_id,
            params.script_hash_addr_id,
            params.hd_private_key_id.to_string(),
            params.hd_public_key_id.to_string(),
        );
    }
}

fn show(registry: &Registry, name: &str) -> anyhow::Result<()> {
    let params = registry
        .by_name(name)
        .with_context(|| format!("network {name:?} is not registered"))?;

    println!("{} ({})", params.name, params.net);
    println!("  genesis:    {}", params.genesis.hash);
    println!("  port:       {}", params.default_port);
    println!(
        "  threshold:  {}/{} blocks",
        params.rule_change_activation_threshold, params.miner_confirmation_window
    );

    println!("  deployments:");
    for (id, deployment) in params.deployments.iter() {
        let start = deployment
            .start_datetime()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| deployment.start_time.to_string());
        let expire = deployment
            .expire_datetime()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "    {:<10} bit {:>2}  {} .. {}",
            id.name(),
            deployment.bit_number,
            start,
            expire
        );
    }

    if params.checkpoints.is_empty() {
        println!("  checkpoints: none");
    } else {
        println!("  checkpoints:");
        for cp in params.checkpoints.checkpoints() {
            println!("    {:>10} {}", cp.height, cp.hash);
        }
    }

    Ok(())
}

fn classify_byte(registry: &Registry, byte: u8) {
    let pkh = registry.is_pub_key_hash_addr_id(byte);
    let sh = registry.is_script_hash_addr_id(byte);
    let kind = match (pkh, sh) {
        (true, true) => "ambiguous (pubkey-hash and script-hash)",
        (true, false) => "pubkey-hash",
        (false, true) => "script-hash",
        (false, false) => "unknown",
    };
    println!("{byte:#04x}: {kind}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("0x32"), Ok(0x32));
        assert_eq!(parse_byte("50"), Ok(50));
        assert!(parse_byte("0x100").is_err());
        assert!(parse_byte("abc").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["params-inspect", "classify-byte", "0x6f"]);
        assert!(matches!(cli.command, Commands::ClassifyByte { byte: 0x6f }));

        let cli = Cli::parse_from(["params-inspect", "--config", "nets.json", "list"]);
        assert_eq!(cli.config.unwrap().to_str(), Some("nets.json"));
    }
}
