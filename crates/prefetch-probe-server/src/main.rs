//! Prefetch probe server — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use prefetch_probe_server::config::{ServerConfig, HEALTH_ROUTE};
use prefetch_probe_server::ProbeServer;

#[derive(Parser)]
#[command(
    name = "prefetch-probe-server",
    about = "Test fixture server that counts prefetches per uuid and echoes cookie state",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the fixture server (default).
    Serve {
        /// Listen address (host:port).
        /// Also reads from PREFETCH_PROBE_ADDR env var.
        #[arg(long)]
        addr: Option<String>,

        /// Path the probe is mounted at; also scopes stash keys.
        /// Also reads from PREFETCH_PROBE_ROUTE env var.
        #[arg(long)]
        route: Option<String>,
    },

    /// Print the probe's request/response contract as JSON.
    Info {
        /// Path the probe is mounted at.
        #[arg(long)]
        route: Option<String>,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   prefetch-probe-server completions bash > ~/.local/share/bash-completion/completions/prefetch-probe-server
    ///   prefetch-probe-server completions zsh > ~/.zfunc/_prefetch-probe-server
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        route: None,
    }) {
        Commands::Serve { addr, route } => {
            let config = ServerConfig::resolve(addr.as_deref(), route.as_deref())?;
            let server = ProbeServer::new(config);
            server.run().await?;
        }

        Commands::Info { route } => {
            let config = ServerConfig::resolve(None, route.as_deref())?;
            let info = serde_json::json!({
                "server": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "route": config.route,
                "health": HEALTH_ROUTE,
                "method": "GET",
                "query": { "uuid": "required", "origin": "optional" },
                "request_headers": ["Sec-Purpose", "Cookie"],
                "response_headers": [
                    "Access-Control-Allow-Origin",
                    "Access-Control-Allow-Credentials",
                    "Set-Cookie",
                ],
                "body": { "prefetch": "integer", "cookie": "integer" },
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "prefetch-probe-server",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
