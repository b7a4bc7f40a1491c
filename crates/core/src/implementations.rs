//! Declared interface implementations

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interfaces::CoreClient;
use crate::resolution::ResolutionContext;
use crate::uri::Uri;

/// Concrete uris implementing an abstract interface uri
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceImplementations {
    pub interface: Uri,
    pub implementations: Vec<Uri>,
}

impl InterfaceImplementations {
    pub fn new(interface: Uri, implementations: Vec<Uri>) -> Self {
        Self {
            interface,
            implementations,
        }
    }
}

/// Collect implementations of `interface_uri`.
///
/// With a client, the interface and every implementation are resolved first,
/// so bindings may point at redirecting uris. Each resolution runs in a sub
/// context of `context`. Order of declaration is kept; duplicates are dropped.
pub async fn get_implementations(
    interface_uri: &Uri,
    interfaces: &[InterfaceImplementations],
    client: Option<&dyn CoreClient>,
    context: &mut ResolutionContext,
) -> Result<Vec<Uri>> {
    let mut found: Vec<Uri> = Vec::new();

    let Some(client) = client else {
        for declared in interfaces.iter().filter(|i| &i.interface == interface_uri) {
            for implementation in &declared.implementations {
                if implementation != &declared.interface && !found.contains(implementation) {
                    found.push(implementation.clone());
                }
            }
        }
        return Ok(found);
    };

    let target = resolve_final_uri(interface_uri, client, context).await?;

    for declared in interfaces {
        let declared_target = if &declared.interface == interface_uri {
            target.clone()
        } else {
            resolve_final_uri(&declared.interface, client, context).await?
        };
        if declared_target != target {
            continue;
        }

        for implementation in &declared.implementations {
            if implementation == &declared.interface {
                continue;
            }
            let resolved = resolve_final_uri(implementation, client, context).await?;
            if !found.contains(&resolved) {
                found.push(resolved);
            }
        }
    }

    tracing::debug!("{} implementation(s) of {}", found.len(), interface_uri);
    Ok(found)
}

async fn resolve_final_uri(
    uri: &Uri,
    client: &dyn CoreClient,
    context: &mut ResolutionContext,
) -> Result<Uri> {
    let mut sub_context = context.create_sub_context();
    let result = client.try_resolve_uri(uri, Some(&mut sub_context)).await?;
    Ok(result.uri().clone())
}
