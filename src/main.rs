use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::B256;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blockprobe::config::{self, PRIVATE_KEY_ENV};
use blockprobe::domain::UnitFormat;
use blockprobe::infrastructure::{connect, AlloyAbiDecoder, ArtifactScanner};
use blockprobe::modules::deploy::{render_plan, render_result};
use blockprobe::modules::inspect::{render_block, render_transaction};
use blockprobe::modules::{prepare_deployment, Deployer, Inspector, Report};

#[derive(Parser)]
#[command(name = "blockprobe")]
#[command(version, about = "Inspect blocks and transactions on an Ethereum node, deploy contracts")]
#[command(after_help = r#"EXAMPLES:
    # Inspect a block on the default network
    blockprobe block 1174

    # Same block with every amount in wei and raw payloads
    blockprobe block 1174 --units raw

    # Inspect a transaction on a named network
    blockprobe -n sepolia tx 0x5c50...e4f1

    # Deploy a compiled contract with constructor arguments
    blockprobe deploy MyContract "Hello, Besu!" 1

ENVIRONMENT VARIABLES:
    BLOCKPROBE_CONFIG        Path to the config file
    BLOCKPROBE_PRIVATE_KEY   Signing key, used ahead of the profile's accounts
    RUST_LOG                 Log filter, overrides -v

CONFIG FILE:
    Default: ./blockprobe.toml, then ~/.config/blockprobe/config.toml
"#)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network profile to connect to
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a block and every transaction in it
    Block {
        number: u64,

        /// How amounts and payloads are shown
        #[arg(long, value_enum, default_value_t = UnitFormat::Human)]
        units: UnitFormat,
    },
    /// Show a transaction, its receipt and the node's state
    Tx { hash: B256 },
    /// Deploy a compiled contract
    Deploy {
        /// Contract name in the artifact directories
        template: String,

        /// Constructor arguments, in declaration order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let mut profile = config.profile(cli.network.as_deref())?;
    if let Ok(key) = std::env::var(PRIVATE_KEY_ENV) {
        if !key.trim().is_empty() {
            profile = profile.with_signing_key(key);
        }
    }

    match cli.command {
        Commands::Block { number, units } => {
            let conn = connect(&profile).await?;
            print(Report::new().add("Using deployer account", conn.account.address))?;

            let decoder = AlloyAbiDecoder::address_uint256();
            let inspector = Inspector::new(&conn.provider, &decoder);
            let inspection = inspector.inspect_block(number).await?;
            print(render_block(&inspection, units))
        }
        Commands::Tx { hash } => {
            let conn = connect(&profile).await?;
            print(Report::new().add("Using deployer account", conn.account.address))?;

            let decoder = AlloyAbiDecoder::address_uint256();
            let inspector = Inspector::new(&conn.provider, &decoder).with_chain_id(conn.chain_id);
            let inspection = inspector.inspect_transaction(hash).await?;
            print(render_transaction(&inspection))
        }
        Commands::Deploy { template, args } => {
            // Template and arguments are checked before anything goes on the wire
            let registry = ArtifactScanner::scan_roots(&config.artifact_paths);
            let plan = prepare_deployment(&registry, &template, &args)?;

            let conn = connect(&profile).await?;
            let account = conn.account.address;
            print(Report::new().add("Deploying contracts with the account", account))?;
            print(render_plan(&plan))?;

            let deployer = Deployer::new(&conn.provider, account, &registry);
            let predicted = deployer.predicted_address().await?;
            print(Report::new().blank().add("Contract deployed to", predicted))?;

            let result = deployer.submit(&plan).await?;
            if result.contract_address != predicted {
                tracing::warn!(
                    "Contract landed at {}, not the predicted {}",
                    result.contract_address,
                    predicted
                );
            }
            print(render_result(&result))
        }
    }
}

fn print(report: Report) -> Result<()> {
    report.write_to(&mut io::stdout().lock())?;
    Ok(())
}
