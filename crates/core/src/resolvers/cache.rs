//! Caches loaded wrappers by requested uri

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use lru::LruCache;

use crate::error::Result;
use crate::interfaces::{CoreClient, UriResolver, Wrapper};
use crate::resolution::{ResolutionContext, ResolutionStep, StepOutcome};
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

const DEFAULT_CAPACITY: usize = 128;
const CACHE_HIT: &str = "WrapperCacheResolver (cache)";

#[derive(Clone)]
struct CachedWrapper {
    path: Vec<Uri>,
    wrapper: Arc<dyn Wrapper>,
}

/// Wraps another resolver and remembers every wrapper it produces.
///
/// Packages are materialized into wrappers before being cached, so a hit never
/// instantiates twice. Hits replay the original resolution path into the
/// context so env derivation sees the same uris.
pub struct WrapperCacheResolver {
    inner: Arc<dyn UriResolver>,
    cache: Mutex<LruCache<Uri, CachedWrapper>>,
}

impl WrapperCacheResolver {
    pub fn new(inner: Arc<dyn UriResolver>) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: Arc<dyn UriResolver>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<Uri, CachedWrapper>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, uri: &Uri, mut path: Vec<Uri>, wrapper: Arc<dyn Wrapper>) {
        if path.is_empty() {
            path.push(uri.clone());
        }
        tracing::debug!("caching wrapper for {}", uri);
        self.lock().put(uri.clone(), CachedWrapper { path, wrapper });
    }
}

#[async_trait]
impl UriResolver for WrapperCacheResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let cached = self.lock().get(uri).cloned();
        if let Some(hit) = cached {
            return Ok(replay(uri, hit, context));
        }

        let start = context.steps().len();
        let result = self.inner.try_resolve_uri(uri, client, context).await?;

        match result {
            UriPackageOrWrapper::Uri(_) => Ok(result),
            UriPackageOrWrapper::Package(resolved, package) => {
                let wrapper = package.create_wrapper().await?;
                self.store(uri, context.resolution_path_since(start), wrapper.clone());
                Ok(UriPackageOrWrapper::Wrapper(resolved, wrapper))
            }
            UriPackageOrWrapper::Wrapper(resolved, wrapper) => {
                self.store(uri, context.resolution_path_since(start), wrapper.clone());
                Ok(UriPackageOrWrapper::Wrapper(resolved, wrapper))
            }
        }
    }
}

fn replay(uri: &Uri, hit: CachedWrapper, context: &mut ResolutionContext) -> UriPackageOrWrapper {
    let last = hit.path.last().cloned().unwrap_or_else(|| uri.clone());

    for pair in hit.path.windows(2) {
        context.track_step(
            ResolutionStep::with_outcome(pair[0].clone(), StepOutcome::Uri(pair[1].clone()))
                .with_description(CACHE_HIT),
        );
    }
    context.track_step(
        ResolutionStep::with_outcome(last.clone(), StepOutcome::Wrapper(last.clone()))
            .with_description(CACHE_HIT),
    );

    UriPackageOrWrapper::Wrapper(last, hit.wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmpv::Value;

    use crate::client::{ClientConfig, WrapClient};
    use crate::resolvers::{PackageResolver, RecursiveResolver, UriRedirectResolver};
    use crate::test_utils::{CountingPackage, uri};

    #[tokio::test]
    async fn test_hit_skips_instantiation_and_replays_path() {
        let package = Arc::new(CountingPackage::new(Value::from(1)));
        let inner = Arc::new(RecursiveResolver::from_resolvers(vec![
            Arc::new(UriRedirectResolver::new(uri("ens/a"), uri("ens/c"))),
            Arc::new(PackageResolver::new(uri("ens/c"), package.clone())),
        ]));
        let cache = WrapperCacheResolver::new(inner);
        let client = WrapClient::new(ClientConfig::builder().build().unwrap());

        let mut first = ResolutionContext::new();
        let result = cache.try_resolve_uri(&uri("ens/a"), &client, &mut first).await.unwrap();
        assert!(matches!(result, UriPackageOrWrapper::Wrapper(ref u, _) if u == &uri("ens/c")));
        assert_eq!(cache.len(), 1);

        let mut second = ResolutionContext::new();
        let result = cache.try_resolve_uri(&uri("ens/a"), &client, &mut second).await.unwrap();
        assert!(matches!(result, UriPackageOrWrapper::Wrapper(ref u, _) if u == &uri("ens/c")));

        assert_eq!(package.count(), 1);
        assert_eq!(second.resolution_path(), first.resolution_path());
        assert!(
            second
                .steps()
                .iter()
                .all(|step| step.description.as_deref() == Some(CACHE_HIT))
        );
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let inner = Arc::new(RecursiveResolver::from_resolvers(Vec::new()));
        let cache = WrapperCacheResolver::with_capacity(inner, 0);
        let client = WrapClient::new(ClientConfig::builder().build().unwrap());

        let mut context = ResolutionContext::new();
        let result = cache
            .try_resolve_uri(&uri("ens/none"), &client, &mut context)
            .await
            .unwrap();
        assert!(!result.is_terminal());
        assert!(cache.is_empty());
    }
}
