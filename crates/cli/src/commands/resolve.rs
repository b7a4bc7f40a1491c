use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use wrapline_core::{CoreClient, ResolutionContext, ResolutionHistory, StepOutcome};

use super::{load_client, parse_uri};
use crate::display::formatter::{print_header, print_history};

#[derive(Serialize)]
struct ResolveReport<'a> {
    uri: &'a str,
    outcome: StepOutcome,
    history: ResolutionHistory,
}

pub async fn resolve_command(uri_arg: &str, json: bool, config: Option<&Path>) -> Result<()> {
    debug!("Resolving: {}", uri_arg);

    let uri = parse_uri(uri_arg)?;
    let client = load_client(config)?;

    let mut context = ResolutionContext::new();
    let result = client.try_resolve_uri(&uri, Some(&mut context)).await;
    let outcome = StepOutcome::from_result(&result);

    if json {
        let report = ResolveReport {
            uri: uri.as_str(),
            outcome,
            history: context.history(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_header("🔍 Resolving", uri.as_str());
        match &result {
            Ok(resolved) if resolved.is_terminal() => println!("✅ Resolved: {outcome}"),
            Ok(_) => println!("❓ No resolver matched: {outcome}"),
            Err(_) => println!("❌ Failed"),
        }
        print_history(&context.history());
    }

    result?;
    Ok(())
}
