//! Client configuration
//!
//! [`ClientConfigBuilder`] collects resolvers, envs and interface bindings and
//! produces an immutable [`ClientConfig`].

use std::sync::Arc;

use rmpv::Value;

use crate::env::{Env, merge_env};
use crate::error::{Error, Result};
use crate::implementations::InterfaceImplementations;
use crate::interfaces::{ManifestPackageLoader, QueryParser, UriResolver, WrapPackage, Wrapper};
use crate::resolvers::{
    ExtendableUriResolver, PackageResolver, RecursiveResolver, URI_RESOLVER_INTERFACE,
    UriRedirectResolver, UriResolverAggregator, WrapperCacheResolver, WrapperResolver,
};
use crate::uri::Uri;

/// Immutable configuration shared by every call made through a client
pub struct ClientConfig {
    /// Top-level resolver chain
    pub resolver: Arc<dyn UriResolver>,
    pub envs: Vec<Env>,
    pub interfaces: Vec<InterfaceImplementations>,
    pub query_parser: Option<Arc<dyn QueryParser>>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for [`ClientConfig`].
///
/// Resolvers are tried in the order they were added. When
/// [`add_defaults`](Self::add_defaults) is used the extension resolver runs
/// after all of them.
#[derive(Default)]
pub struct ClientConfigBuilder {
    resolvers: Vec<Arc<dyn UriResolver>>,
    envs: Vec<Env>,
    interfaces: Vec<InterfaceImplementations>,
    wrapper_cache: Option<usize>,
    query_parser: Option<Arc<dyn QueryParser>>,
    package_loader: Option<Arc<dyn ManifestPackageLoader>>,
    extensions: bool,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_redirect(self, from: Uri, to: Uri) -> Self {
        self.add_resolver(Arc::new(UriRedirectResolver::new(from, to)))
    }

    pub fn add_package(self, uri: Uri, package: Arc<dyn WrapPackage>) -> Self {
        self.add_resolver(Arc::new(PackageResolver::new(uri, package)))
    }

    pub fn add_wrapper(self, uri: Uri, wrapper: Arc<dyn Wrapper>) -> Self {
        self.add_resolver(Arc::new(WrapperResolver::new(uri, wrapper)))
    }

    pub fn add_resolver(mut self, resolver: Arc<dyn UriResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Declare an env for `uri`. A second declaration for the same uri is
    /// shallow-merged into the first.
    pub fn add_env(mut self, uri: Uri, env: Value) -> Self {
        match self.envs.iter_mut().find(|existing| existing.uri == uri) {
            Some(existing) => merge_env(&mut existing.env, env),
            None => self.envs.push(Env::new(uri, env)),
        }
        self
    }

    pub fn add_interface_implementation(self, interface: Uri, implementation: Uri) -> Self {
        self.add_interface_implementations(interface, vec![implementation])
    }

    pub fn add_interface_implementations(mut self, interface: Uri, implementations: Vec<Uri>) -> Self {
        let index = match self.interfaces.iter().position(|i| i.interface == interface) {
            Some(index) => index,
            None => {
                self.interfaces.push(InterfaceImplementations::new(interface, Vec::new()));
                self.interfaces.len() - 1
            }
        };

        let declared = &mut self.interfaces[index].implementations;
        for implementation in implementations {
            if !declared.contains(&implementation) {
                declared.push(implementation);
            }
        }
        self
    }

    /// Register the uri-resolver interface and resolve through its extensions
    pub fn add_defaults(mut self) -> Self {
        self.extensions = true;
        self
    }

    /// Turn manifests returned by resolver extensions into packages
    pub fn with_package_loader(mut self, loader: Arc<dyn ManifestPackageLoader>) -> Self {
        self.package_loader = Some(loader);
        self
    }

    /// Cache up to `capacity` loaded wrappers
    pub fn with_wrapper_cache(mut self, capacity: usize) -> Self {
        self.wrapper_cache = Some(capacity);
        self
    }

    pub fn with_query_parser(mut self, parser: Arc<dyn QueryParser>) -> Self {
        self.query_parser = Some(parser);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let mut interfaces = self.interfaces;
        let mut resolvers = self.resolvers;

        if self.extensions {
            let interface_uri = Uri::parse(URI_RESOLVER_INTERFACE)?;
            if !interfaces.iter().any(|i| i.interface == interface_uri) {
                interfaces.push(InterfaceImplementations::new(interface_uri.clone(), Vec::new()));
            }

            let mut extendable = ExtendableUriResolver::new(interface_uri);
            if let Some(loader) = self.package_loader {
                extendable = extendable.with_package_loader(loader);
            }
            resolvers.push(Arc::new(extendable));
        }

        for declared in &interfaces {
            if declared.implementations.contains(&declared.interface) {
                return Err(Error::ConfigError(format!(
                    "interface {} lists itself as an implementation",
                    declared.interface
                )));
            }
        }

        let aggregator: Arc<dyn UriResolver> = Arc::new(UriResolverAggregator::new(resolvers));
        let recursive: Arc<dyn UriResolver> = Arc::new(RecursiveResolver::new(aggregator));
        let resolver: Arc<dyn UriResolver> = match self.wrapper_cache {
            Some(capacity) => Arc::new(WrapperCacheResolver::with_capacity(recursive, capacity)),
            None => recursive,
        };

        tracing::debug!(
            "client config built with {} env(s) and {} interface(s)",
            self.envs.len(),
            interfaces.len()
        );

        Ok(ClientConfig {
            resolver,
            envs: self.envs,
            interfaces,
            query_parser: self.query_parser,
        })
    }
}
