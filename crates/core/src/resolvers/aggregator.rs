//! Ordered aggregation of resolvers

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::interfaces::{CoreClient, UriResolver};
use crate::resolution::{ResolutionContext, ResolutionStep};
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Tries each resolver in list order and returns the first result that is
/// not "no match". List order is the only priority.
#[derive(Clone)]
pub struct UriResolverAggregator {
    resolvers: Vec<Arc<dyn UriResolver>>,
    name: String,
}

impl UriResolverAggregator {
    pub fn new(resolvers: Vec<Arc<dyn UriResolver>>) -> Self {
        Self {
            resolvers,
            name: "UriResolverAggregator".to_string(),
        }
    }

    /// Step description used in the resolution history
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn resolvers(&self) -> &[Arc<dyn UriResolver>] {
        &self.resolvers
    }
}

#[async_trait]
impl UriResolver for UriResolverAggregator {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        aggregate(&self.resolvers, uri, client, context, &self.name).await
    }
}

/// Run `resolvers` in order against `uri`.
///
/// Child attempts go into a sub context and end up as the sub history of a
/// single step recorded under `description`.
pub(crate) async fn aggregate(
    resolvers: &[Arc<dyn UriResolver>],
    uri: &Uri,
    client: &dyn CoreClient,
    context: &mut ResolutionContext,
    description: &str,
) -> Result<UriPackageOrWrapper> {
    let mut sub_context = context.create_sub_context();
    let mut outcome = Ok(UriPackageOrWrapper::Uri(uri.clone()));

    for resolver in resolvers {
        match resolver.try_resolve_uri(uri, client, &mut sub_context).await {
            Ok(UriPackageOrWrapper::Uri(next)) if &next == uri => continue,
            other => {
                outcome = other;
                break;
            }
        }
    }

    context.track_step(
        ResolutionStep::new(uri.clone(), &outcome)
            .with_description(description)
            .with_sub_history(sub_context.into_history()),
    );
    outcome
}
