//! The client: resolution, loading and invocation of wrappers

mod bridge;
pub mod config;
pub mod query;

pub use bridge::negotiate;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use query::{QueryOptions, QueryResult};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rmpv::Value;

use crate::env::get_env_from_resolution_path;
use crate::error::{Error, Result};
use crate::implementations;
use crate::interfaces::{CoreClient, GetImplementationsOptions, WrapPackage, Wrapper};
use crate::resolution::ResolutionContext;
use crate::types::{FileContent, GetFileOptions, InvokeOptions, InvokeResult, UriPackageOrWrapper};
use crate::uri::Uri;

/// Entry point for resolving and invoking wrappers.
///
/// Cloning is cheap; clones share the same configuration.
#[derive(Clone)]
pub struct WrapClient {
    config: Arc<ClientConfig>,
}

impl WrapClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    async fn resolve_for_loading(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let resolution = AssertUnwindSafe(self.try_resolve_uri(uri, Some(&mut *context)));
        let reason = match resolution.catch_unwind().await {
            Ok(Ok(resolved)) => return Ok(resolved),
            Ok(Err(e)) if e.is_resolution_error() => return Err(e),
            Ok(Err(e)) => e,
            Err(panic) => {
                let message = bridge::panic_message(panic.as_ref());
                tracing::error!("resolving {} panicked: {}", uri, message);
                Error::ResolverPanicked(message)
            }
        };

        Err(Error::ResolutionFailed {
            uri: uri.clone(),
            reason: Box::new(reason),
            history: context.history(),
        })
    }

    async fn create_wrapper(&self, uri: &Uri, package: Arc<dyn WrapPackage>) -> Result<Arc<dyn Wrapper>> {
        match AssertUnwindSafe(package.create_wrapper()).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let message = bridge::panic_message(panic.as_ref());
                tracing::error!("creating wrapper for {} panicked: {}", uri, message);
                Err(Error::PackageInstantiationFailed {
                    uri: uri.clone(),
                    message,
                })
            }
        }
    }

    async fn invoke_inner(
        &self,
        mut options: InvokeOptions,
        context: &mut ResolutionContext,
    ) -> InvokeResult {
        let start = context.steps().len();
        let wrapper = self.load_wrapper(&options.uri, Some(&mut *context)).await?;

        if options.env.is_none() {
            let mut path = context.resolution_path_since(start);
            if path.is_empty() {
                path.push(options.uri.clone());
            }
            if let Some(env) = get_env_from_resolution_path(&path, self.envs()) {
                tracing::debug!("using env of {} for {}", env.uri, options.uri);
                options.env = Some(env.env.clone());
            }
        }

        self.invoke_wrapper(options, wrapper).await
    }
}

#[async_trait]
impl CoreClient for WrapClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn to_shared(&self) -> Arc<dyn CoreClient> {
        Arc::new(self.clone())
    }

    async fn invoke(&self, options: InvokeOptions) -> InvokeResult {
        let mut context = ResolutionContext::new();
        self.invoke_with_context(options, &mut context).await
    }

    async fn invoke_with_context(
        &self,
        options: InvokeOptions,
        context: &mut ResolutionContext,
    ) -> InvokeResult {
        let uri = options.uri.clone();
        let method = options.method.clone();
        tracing::info!("invoking {}.{}", uri, method);

        match AssertUnwindSafe(self.invoke_inner(options, context)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(bridge::fault(&uri, &method, panic)),
        }
    }

    async fn invoke_wrapper(&self, options: InvokeOptions, wrapper: Arc<dyn Wrapper>) -> InvokeResult {
        bridge::invoke_wrapper(self, options, wrapper).await
    }

    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        context: Option<&mut ResolutionContext>,
    ) -> Result<UriPackageOrWrapper> {
        let mut local = ResolutionContext::new();
        let context = match context {
            Some(context) => context,
            None => &mut local,
        };
        self.config.resolver.try_resolve_uri(uri, self, context).await
    }

    async fn load_wrapper(
        &self,
        uri: &Uri,
        context: Option<&mut ResolutionContext>,
    ) -> Result<Arc<dyn Wrapper>> {
        let mut local = ResolutionContext::new();
        let context = match context {
            Some(context) => context,
            None => &mut local,
        };

        match self.resolve_for_loading(uri, context).await? {
            UriPackageOrWrapper::Uri(target) => Err(Error::UriNotFound {
                uri: uri.clone(),
                target,
                history: context.history(),
            }),
            UriPackageOrWrapper::Package(resolved, package) => {
                tracing::debug!("creating wrapper from package {}", resolved);
                self.create_wrapper(&resolved, package).await
            }
            UriPackageOrWrapper::Wrapper(_, wrapper) => Ok(wrapper),
        }
    }

    async fn get_implementations(
        &self,
        uri: &Uri,
        options: GetImplementationsOptions,
        context: Option<&mut ResolutionContext>,
    ) -> Result<Vec<Uri>> {
        let mut local = ResolutionContext::new();
        let context = match context {
            Some(context) => context,
            None => &mut local,
        };
        let client: Option<&dyn CoreClient> = if options.apply_resolution {
            Some(self)
        } else {
            None
        };
        implementations::get_implementations(uri, self.interfaces(), client, context).await
    }

    async fn get_manifest(&self, uri: &Uri) -> Result<Value> {
        let wrapper = self.load_wrapper(uri, None).await?;
        Ok(wrapper.manifest())
    }

    async fn get_file(&self, uri: &Uri, options: &GetFileOptions) -> Result<FileContent> {
        let wrapper = self.load_wrapper(uri, None).await?;
        wrapper.get_file(options).await
    }
}
