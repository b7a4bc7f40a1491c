use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{env_command, implementations_command, resolve_command};

#[derive(Parser, Debug)]
#[command(name = "wrapline")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug          Enable debug logging\n    WRAPLINE_CONFIG=<path>  Configuration file to use")]
pub struct Cli {
    /// Configuration file (defaults to the nearest .wrapline.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a URI and show how it was resolved
    #[command(visible_alias = "r")]
    Resolve {
        /// URI to resolve (e.g. wrap://ens/app.eth)
        uri: String,

        /// Print the outcome and history as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List the implementations of an interface
    #[command(visible_alias = "i")]
    Implementations {
        /// Interface URI
        interface: String,

        /// Resolve the interface and each implementation first
        #[arg(short, long)]
        apply_resolution: bool,
    },
    /// Show the env an invocation of a URI would receive
    Env {
        /// URI to resolve
        uri: String,
    },
}

impl Cli {
    /// Execute the parsed command
    pub async fn execute(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Resolve { uri, json } => resolve_command(&uri, json, config).await,
            Commands::Implementations {
                interface,
                apply_resolution,
            } => implementations_command(&interface, apply_resolution, config).await,
            Commands::Env { uri } => env_command(&uri, config).await,
        }
    }
}
