use std::path::Path;

use anyhow::Result;
use tracing::debug;
use wrapline_core::{CoreClient, GetImplementationsOptions};

use super::{load_client, parse_uri};

pub async fn implementations_command(
    interface_arg: &str,
    apply_resolution: bool,
    config: Option<&Path>,
) -> Result<()> {
    debug!("Listing implementations of {}", interface_arg);

    let interface = parse_uri(interface_arg)?;
    let client = load_client(config)?;

    let implementations = client
        .get_implementations(&interface, GetImplementationsOptions { apply_resolution }, None)
        .await?;

    if implementations.is_empty() {
        println!("No implementations of {interface}");
    }
    for implementation in implementations {
        println!("{implementation}");
    }
    Ok(())
}
