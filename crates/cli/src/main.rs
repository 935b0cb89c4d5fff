//! Site CMS CLI - schema checks and backend diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # List every content area with its slug and backend path
//! cms-cli areas
//!
//! # Validate a record file against an area's form schema
//! cms-cli validate --area testimonials --file testimonials.yaml
//!
//! # Try the login flow against CMS_API_URL
//! CMS_PASSWORD=... cms-cli login --email editor@example.com
//! ```
//!
//! # Commands
//!
//! - `areas` - List content areas
//! - `validate` - Validate a JSON or YAML record
//! - `login` - Run the admin login flow and report the outcome

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "cms-cli")]
#[command(author, version, about = "Site CMS admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List content areas
    Areas,
    /// Validate a record file against an area's schema
    Validate {
        /// Area slug (see `areas`)
        #[arg(short, long)]
        area: String,

        /// JSON or YAML file holding the record
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Run the login flow against the configured CMS API
    Login {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Password (read from `CMS_PASSWORD` when omitted)
        #[arg(long, env = "CMS_PASSWORD", hide_env_values = true)]
        password: String,

        /// Accept logins that return no token, as the admin can be configured to
        #[arg(long)]
        allow_unverified: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Areas => commands::areas::list(),
        Commands::Validate { area, file } => commands::validate::run(&area, &file)?,
        Commands::Login {
            email,
            password,
            allow_unverified,
        } => {
            commands::login::run(&email, &SecretString::from(password), allow_unverified).await?;
        }
    }
    Ok(())
}
