use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use livecast_core::codec::{self, Decoded};
use livecast_core::utils::{DEFAULT_STUN_ADDR, DEFAULT_STUN_ADDR_2};
use livecast_core::{IceServerConfig, PeerId};
use livecast_server::{DEFAULT_BIND_ADDR, DEFAULT_ROUTE, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "livecast")]
#[command(about = "Signaling relay for one-to-many livestreams")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, env = "LIVECAST_ADDR", default_value = DEFAULT_BIND_ADDR)]
        addr: SocketAddr,

        #[arg(long, env = "LIVECAST_ROUTE", default_value = DEFAULT_ROUTE)]
        route: String,

        /// STUN/TURN urls advertised to participants.
        #[arg(
            long = "stun",
            env = "LIVECAST_STUN",
            value_delimiter = ',',
            default_values_t = [DEFAULT_STUN_ADDR.to_string(), DEFAULT_STUN_ADDR_2.to_string()]
        )]
        stun: Vec<String>,

        #[arg(long)]
        no_cors: bool,
    },
    /// Decode a relayed signaling payload as a given participant would.
    Inspect {
        /// Participant id to read the payload as.
        #[arg(long = "as")]
        local_id: String,

        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Serve {
            addr,
            route,
            stun,
            no_cors,
        } => {
            let config = ServerConfig {
                bind_addr: addr,
                route,
                ice_servers: stun.into_iter().map(IceServerConfig::stun).collect(),
                allow_cors: !no_cors,
            };

            println!("{}", "📡 Starting Livecast relay...".green().bold());
            println!("   🔌 Endpoint: ws://{}{}", config.bind_addr, config.route);
            for server in &config.ice_servers {
                println!("   🧊 ICE:      {}", server.urls.join(", "));
            }

            livecast_server::serve(config).await?;
        }
        Commands::Inspect { local_id, payload } => {
            let local_id = PeerId::from(local_id);
            match codec::decode(&local_id, &payload).context("Failed to decode payload")? {
                Decoded::Addressed(msg) => {
                    println!(
                        "{} {} from {}",
                        "✔".green().bold(),
                        msg.kind(),
                        msg.remote_id()
                    );
                }
                Decoded::NotForUs { addressee } => {
                    println!("{} addressed to {}, ignored", "✘".yellow().bold(), addressee);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
