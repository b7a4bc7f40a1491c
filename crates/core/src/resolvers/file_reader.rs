//! Reads package files through the resolver extension that found them

use std::sync::Arc;

use async_trait::async_trait;
use rmpv::Value;

use crate::error::{Error, Result};
use crate::interfaces::{CoreClient, FileReader};
use crate::types::InvokeOptions;
use crate::uri::Uri;

/// Serves files of `wrapper_uri` by invoking `getFile` on the extension
pub struct ExtensionFileReader {
    extension_uri: Uri,
    wrapper_uri: Uri,
    client: Arc<dyn CoreClient>,
}

impl ExtensionFileReader {
    pub fn new(extension_uri: Uri, wrapper_uri: Uri, client: Arc<dyn CoreClient>) -> Self {
        Self {
            extension_uri,
            wrapper_uri,
            client,
        }
    }
}

#[async_trait]
impl FileReader for ExtensionFileReader {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = combine_paths(self.wrapper_uri.path(), path);
        let args = Value::Map(vec![(Value::from("path"), Value::from(full_path.as_str()))]);
        let options = InvokeOptions::new(self.extension_uri.clone(), "getFile").with_args(args);

        match self.client.invoke(options).await?.into_native()? {
            Value::Binary(bytes) => Ok(bytes),
            Value::Nil => Err(Error::FileNotFound(full_path)),
            other => Err(Error::EncodingFailed(format!(
                "getFile returned {other}, expected bytes"
            ))),
        }
    }
}

/// Join two path fragments with exactly one separator
pub(crate) fn combine_paths(base: &str, file: &str) -> String {
    let mut combined = base.replace('\\', "/");
    if !combined.ends_with('/') {
        combined.push('/');
    }
    let file = file.replace('\\', "/");
    combined.push_str(file.trim_start_matches(['/', '.']));
    combined
}
