//! Subdomain registrar.
//!
//! # Usage
//!
//! ```bash
//! # Serve bound subdomains (and the not-found page for the rest)
//! cargo run -- serve
//!
//! # Claim a subdomain interactively
//! cargo run -- register --token <token>
//!
//! # One-off availability check
//! cargo run -- check myblog
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

use subdomain_registrar::{config, console, server, telemetry};

/// Claim a subdomain under the shared hosting domain.
#[derive(Parser)]
#[command(name = "subdomain-registrar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hosting server
    Serve,

    /// Interactive registration session
    Register {
        /// Sign-in token (prompted for on `:login` if absent)
        #[arg(short, long, env = "REGISTRAR_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Check whether a subdomain is available
    Check {
        /// Candidate name (normalized to lowercase)
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init(&config.log_level, &config.log_format);

    match cli.command {
        Commands::Serve => {
            config.print_summary();
            server::run(config).await?;
        }
        Commands::Register { token } => console::run_interactive(config, token).await?,
        Commands::Check { name } => console::run_check(&config, &name).await?,
    }

    Ok(())
}
