use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli {
    pub mod email;
    pub mod server;
}

/// ksm-portfolio - contact inquiry relay for the KSM portfolio site
#[derive(Parser)]
#[command(name = "ksm-portfolio")]
#[command(about = "Relays portfolio contact inquiries to the studio inbox", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check that email delivery is configured
    CheckConfig,
    /// Send a sample inquiry to the configured inbox
    SendTest,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ksm_portfolio::Config::load(cli.config)?;

    ksm_portfolio::observability::init_observability(
        "ksm-portfolio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::CheckConfig => cli::email::check_config(&config),
        Commands::SendTest => cli::email::send_test(&config).await,
    }
}
