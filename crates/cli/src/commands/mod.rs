pub mod env;
pub mod implementations;
pub mod resolve;

pub use env::env_command;
pub use implementations::implementations_command;
pub use resolve::resolve_command;

use std::path::Path;

use anyhow::{Context, Result};
use wrapline_core::{ConfigLoader, Uri, WrapClient};

/// Build a client from the configuration file in effect
pub(crate) fn load_client(config: Option<&Path>) -> Result<WrapClient> {
    let json = ConfigLoader::load(config).context("Failed to load configuration")?;
    let config = json.build().context("Invalid configuration")?;
    Ok(WrapClient::new(config))
}

pub(crate) fn parse_uri(input: &str) -> Result<Uri> {
    Uri::parse(input).with_context(|| format!("Not a valid URI: {input}"))
}
