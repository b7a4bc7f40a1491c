use std::path::Path;

use anyhow::Result;
use tracing::debug;
use wrapline_core::env::get_env_from_resolution_path;
use wrapline_core::{CoreClient, ResolutionContext};

use super::{load_client, parse_uri};
use crate::display::formatter::format_value;

pub async fn env_command(uri_arg: &str, config: Option<&Path>) -> Result<()> {
    debug!("Deriving env for {}", uri_arg);

    let uri = parse_uri(uri_arg)?;
    let client = load_client(config)?;

    let mut context = ResolutionContext::new();
    client.try_resolve_uri(&uri, Some(&mut context)).await?;

    let mut path = context.resolution_path();
    if path.is_empty() {
        path.push(uri.clone());
    }
    debug!("resolution path: {:?}", path);

    match get_env_from_resolution_path(&path, client.envs()) {
        Some(env) => {
            println!("# env of {}", env.uri);
            println!("{}", format_value(&env.env));
        }
        None => println!("No env for {uri}"),
    }
    Ok(())
}
