//! Wrapper and package contracts implemented by execution engines

use std::sync::Arc;

use async_trait::async_trait;
use rmpv::Value;

use super::CoreClient;
use crate::error::Result;
use crate::types::{FileContent, GetFileOptions, InvokeOptions, InvokeValue};

/// A loaded, invocable unit
#[async_trait]
pub trait Wrapper: Send + Sync {
    /// Invoke a method. `client` lets the wrapper call other URIs through
    /// the same client.
    async fn invoke(&self, options: &InvokeOptions, client: &dyn CoreClient) -> Result<InvokeValue>;

    /// Manifest describing the wrapper
    fn manifest(&self) -> Value;

    /// Read a file bundled with the wrapper
    async fn get_file(&self, options: &GetFileOptions) -> Result<FileContent>;
}

/// A factory one step short of an invocable wrapper
#[async_trait]
pub trait WrapPackage: Send + Sync {
    async fn create_wrapper(&self) -> Result<Arc<dyn Wrapper>>;

    fn manifest(&self) -> Value;
}

/// Reads package files from wherever the package came from
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

/// Turns a manifest returned by a resolver extension into a package
pub trait ManifestPackageLoader: Send + Sync {
    fn load(&self, manifest: Vec<u8>, reader: Arc<dyn FileReader>) -> Result<Arc<dyn WrapPackage>>;
}
