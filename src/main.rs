use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gift_registry::client::RegistryClient;
use gift_registry::config::RegistryConfig;
use gift_registry::registry::Registry;
use gift_registry::api;

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Gift registry server and client")]
struct Cli {
    /// Base URL of a running server, for the client commands
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding presentes.json and pessoas.json
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Check server status
    Status,
    /// Print the gift list
    Gifts,
    /// Print the reservation records
    People,
    /// Reserve a gift for a guest
    Reserve {
        #[arg(short, long)]
        gift: String,
        #[arg(short, long)]
        name: String,
    },
    /// Cancel a guest's reservation
    Cancel {
        #[arg(short, long)]
        gift: String,
        #[arg(short, long)]
        name: String,
    },
    /// Show a guest's counters
    Summary {
        #[arg(short, long)]
        name: String,
    },
    /// Cross-check the data files and report inconsistencies
    Check {
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "gift_registry=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(data_dir: Option<PathBuf>) -> anyhow::Result<RegistryConfig> {
    let mut config = RegistryConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

async fn serve(config: RegistryConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    tracing::info!(
        "Serving gifts from {} and reservations from {}",
        config.gifts_path().display(),
        config.people_path().display()
    );

    let app = api::create_router(Registry::from_config(&config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gift registry listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = match cli.url {
        Some(url) => RegistryClient::new(url),
        None => RegistryClient::from_env(),
    };

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            data_dir,
        }) => {
            let mut config = load_config(data_dir)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        None => serve(load_config(None)?).await?,
        Some(Commands::Status) => {
            let health = client.health().await?;
            println!(
                "{} is {} ({})",
                client.base_url(),
                health.status,
                health.timestamp.to_rfc3339()
            );
        }
        Some(Commands::Gifts) => print_json(&client.list_gifts().await?)?,
        Some(Commands::People) => print_json(&client.list_people().await?)?,
        Some(Commands::Reserve { gift, name }) => {
            let response = client.reserve(&gift, &name).await?;
            println!("{}", response.message);
            if !response.success {
                std::process::exit(1);
            }
        }
        Some(Commands::Cancel { gift, name }) => {
            let response = client.cancel(&gift, &name).await?;
            println!("{}", response.message);
        }
        Some(Commands::Summary { name }) => print_json(&client.summary(&name).await?)?,
        Some(Commands::Check { data_dir }) => {
            let registry = Registry::from_config(&load_config(data_dir)?);
            let problems = registry.audit()?;
            if problems.is_empty() {
                println!("Gift list and reservation records are consistent");
            } else {
                for problem in &problems {
                    println!("{}", problem);
                }
                anyhow::bail!("{} inconsistencies found", problems.len());
            }
        }
    }

    Ok(())
}
