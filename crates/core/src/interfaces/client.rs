use std::sync::Arc;

use async_trait::async_trait;
use rmpv::Value;

use super::{UriResolver, Wrapper};
use crate::client::ClientConfig;
use crate::env::Env;
use crate::error::Result;
use crate::implementations::InterfaceImplementations;
use crate::resolution::ResolutionContext;
use crate::types::{FileContent, GetFileOptions, InvokeOptions, InvokeResult, UriPackageOrWrapper};
use crate::uri::Uri;

/// Options for [`CoreClient::get_implementations`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GetImplementationsOptions {
    /// Resolve the interface and each implementation before returning them
    pub apply_resolution: bool,
}

/// The client handle passed to resolvers and wrappers.
///
/// Every method that touches resolution accepts an optional context. When one
/// is given its in-progress set and history are shared with the caller.
#[async_trait]
pub trait CoreClient: Send + Sync {
    fn config(&self) -> &ClientConfig;

    fn resolver(&self) -> &Arc<dyn UriResolver> {
        &self.config().resolver
    }

    fn envs(&self) -> &[Env] {
        &self.config().envs
    }

    fn interfaces(&self) -> &[InterfaceImplementations] {
        &self.config().interfaces
    }

    /// Environment declared for exactly this uri
    fn env_by_uri(&self, uri: &Uri) -> Option<&Value> {
        self.envs().iter().find(|env| &env.uri == uri).map(|env| &env.env)
    }

    /// An owned handle on this client, for collaborators that outlive the call
    fn to_shared(&self) -> Arc<dyn CoreClient>;

    async fn invoke(&self, options: InvokeOptions) -> InvokeResult;

    async fn invoke_with_context(
        &self,
        options: InvokeOptions,
        context: &mut ResolutionContext,
    ) -> InvokeResult;

    async fn invoke_wrapper(&self, options: InvokeOptions, wrapper: Arc<dyn Wrapper>) -> InvokeResult;

    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        context: Option<&mut ResolutionContext>,
    ) -> Result<UriPackageOrWrapper>;

    async fn load_wrapper(
        &self,
        uri: &Uri,
        context: Option<&mut ResolutionContext>,
    ) -> Result<Arc<dyn Wrapper>>;

    async fn get_implementations(
        &self,
        uri: &Uri,
        options: GetImplementationsOptions,
        context: Option<&mut ResolutionContext>,
    ) -> Result<Vec<Uri>>;

    async fn get_manifest(&self, uri: &Uri) -> Result<Value>;

    async fn get_file(&self, uri: &Uri, options: &GetFileOptions) -> Result<FileContent>;
}
