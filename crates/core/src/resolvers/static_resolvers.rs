//! Resolvers backed by a single, fixed binding

use std::sync::Arc;

use async_trait::async_trait;

use super::track_result;
use crate::error::Result;
use crate::interfaces::{CoreClient, UriResolver, WrapPackage, Wrapper};
use crate::resolution::ResolutionContext;
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Redirects one uri to another
#[derive(Debug, Clone)]
pub struct UriRedirectResolver {
    from: Uri,
    to: Uri,
}

impl UriRedirectResolver {
    pub fn new(from: Uri, to: Uri) -> Self {
        Self { from, to }
    }
}

#[async_trait]
impl UriResolver for UriRedirectResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        _client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let target = if uri == &self.from { &self.to } else { uri };
        track_result(
            context,
            uri,
            format!("Redirect ({} - {})", self.from, self.to),
            Ok(UriPackageOrWrapper::Uri(target.clone())),
        )
    }
}

/// Resolves one uri to a package
#[derive(Clone)]
pub struct PackageResolver {
    uri: Uri,
    package: Arc<dyn WrapPackage>,
}

impl PackageResolver {
    pub fn new(uri: Uri, package: Arc<dyn WrapPackage>) -> Self {
        Self { uri, package }
    }
}

#[async_trait]
impl UriResolver for PackageResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        _client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let result = if uri == &self.uri {
            UriPackageOrWrapper::Package(uri.clone(), self.package.clone())
        } else {
            UriPackageOrWrapper::Uri(uri.clone())
        };
        track_result(context, uri, format!("Package ({})", self.uri), Ok(result))
    }
}

/// Resolves one uri to an already loaded wrapper
#[derive(Clone)]
pub struct WrapperResolver {
    uri: Uri,
    wrapper: Arc<dyn Wrapper>,
}

impl WrapperResolver {
    pub fn new(uri: Uri, wrapper: Arc<dyn Wrapper>) -> Self {
        Self { uri, wrapper }
    }
}

#[async_trait]
impl UriResolver for WrapperResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        _client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let result = if uri == &self.uri {
            UriPackageOrWrapper::Wrapper(uri.clone(), self.wrapper.clone())
        } else {
            UriPackageOrWrapper::Uri(uri.clone())
        };
        track_result(context, uri, format!("Wrapper ({})", self.uri), Ok(result))
    }
}
