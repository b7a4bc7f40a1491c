//! Follows redirects until a terminal result or a dead end

use std::sync::Arc;

use async_trait::async_trait;

use super::UriResolverAggregator;
use crate::error::{Error, Result};
use crate::interfaces::{CoreClient, UriResolver};
use crate::resolution::ResolutionContext;
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Re-enters the inner resolver whenever it redirects.
///
/// Owns the in-progress bookkeeping: a uri already being resolved in this
/// context fails with [`Error::CycleDetected`].
#[derive(Clone)]
pub struct RecursiveResolver {
    inner: Arc<dyn UriResolver>,
}

impl RecursiveResolver {
    pub fn new(inner: Arc<dyn UriResolver>) -> Self {
        Self { inner }
    }

    /// Recursive resolution over an ordered aggregator of `resolvers`
    pub fn from_resolvers(resolvers: Vec<Arc<dyn UriResolver>>) -> Self {
        Self::new(Arc::new(UriResolverAggregator::new(resolvers)))
    }
}

#[async_trait]
impl UriResolver for RecursiveResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        if context.is_resolving(uri) {
            tracing::warn!("cycle detected while resolving {}", uri);
            return Err(Error::CycleDetected {
                uri: uri.clone(),
                history: context.history(),
            });
        }
        let mut context = context.enter(uri);

        match self.inner.try_resolve_uri(uri, client, &mut context).await {
            Ok(UriPackageOrWrapper::Uri(next)) if &next != uri => {
                tracing::debug!("{} redirected to {}", uri, next);
                self.try_resolve_uri(&next, client, &mut context).await
            }
            other => other,
        }
    }
}
