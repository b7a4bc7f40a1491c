//! Resolution delegated to registered resolver extensions

use std::sync::Arc;

use async_trait::async_trait;

use super::UriResolverWrapper;
use super::aggregator::aggregate;
use crate::error::Result;
use crate::interfaces::{CoreClient, GetImplementationsOptions, ManifestPackageLoader, UriResolver};
use crate::resolution::ResolutionContext;
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Interface uri every resolver extension registers under
pub const URI_RESOLVER_INTERFACE: &str = "wrap://ens/uri-resolver.core.polywrap.eth";

/// Aggregates the current implementations of the resolver interface.
///
/// The list is read from the client on every call. Extensions already being
/// resolved in this context are skipped, which is what lets an extension be
/// loaded through the same chain it extends.
pub struct ExtendableUriResolver {
    interface_uri: Uri,
    package_loader: Option<Arc<dyn ManifestPackageLoader>>,
}

impl ExtendableUriResolver {
    pub fn new(interface_uri: Uri) -> Self {
        Self {
            interface_uri,
            package_loader: None,
        }
    }

    /// Loader used when an extension answers with a manifest
    pub fn with_package_loader(mut self, loader: Arc<dyn ManifestPackageLoader>) -> Self {
        self.package_loader = Some(loader);
        self
    }

    pub fn interface_uri(&self) -> &Uri {
        &self.interface_uri
    }
}

#[async_trait]
impl UriResolver for ExtendableUriResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let implementations = client
            .get_implementations(&self.interface_uri, GetImplementationsOptions::default(), None)
            .await?;

        let resolvers: Vec<Arc<dyn UriResolver>> = implementations
            .into_iter()
            .filter(|implementation| !context.is_resolving(implementation))
            .map(|implementation| {
                let mut resolver = UriResolverWrapper::new(implementation);
                if let Some(loader) = &self.package_loader {
                    resolver = resolver.with_package_loader(loader.clone());
                }
                Arc::new(resolver) as Arc<dyn UriResolver>
            })
            .collect();

        aggregate(&resolvers, uri, client, context, "ExtendableUriResolver").await
    }
}
