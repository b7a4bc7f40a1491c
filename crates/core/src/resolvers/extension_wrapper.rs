//! A single resolver extension exposed as a resolver

use std::sync::Arc;

use async_trait::async_trait;
use rmpv::Value;

use super::ExtensionFileReader;
use crate::codec::map_get;
use crate::error::{Error, Result};
use crate::interfaces::{CoreClient, ManifestPackageLoader, UriResolver};
use crate::resolution::{ResolutionContext, ResolutionStep};
use crate::types::{InvokeOptions, UriPackageOrWrapper};
use crate::uri::Uri;

/// What an extension answered for one uri
#[derive(Debug, Clone, PartialEq)]
enum ExtensionAnswer {
    Redirect(Uri),
    Manifest(Vec<u8>),
    NoMatch,
}

/// Loads the extension at `implementation_uri` and asks it to resolve uris.
///
/// The extension is called with method `tryResolveUri` and the arguments
/// `{ authority, path }`. It answers with an optional `uri` and an optional
/// `manifest`.
pub struct UriResolverWrapper {
    implementation_uri: Uri,
    package_loader: Option<Arc<dyn ManifestPackageLoader>>,
}

impl UriResolverWrapper {
    pub fn new(implementation_uri: Uri) -> Self {
        Self {
            implementation_uri,
            package_loader: None,
        }
    }

    pub fn with_package_loader(mut self, loader: Arc<dyn ManifestPackageLoader>) -> Self {
        self.package_loader = Some(loader);
        self
    }

    pub fn implementation_uri(&self) -> &Uri {
        &self.implementation_uri
    }

    async fn resolve_with_extension(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        sub_context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let extension = client
            .load_wrapper(&self.implementation_uri, Some(&mut *sub_context))
            .await
            .map_err(|e| Error::ExtensionLoadFailed {
                uri: self.implementation_uri.clone(),
                reason: Box::new(e),
            })?;

        let args = Value::Map(vec![
            (Value::from("authority"), Value::from(uri.authority())),
            (Value::from("path"), Value::from(uri.path())),
        ]);
        let mut options = InvokeOptions::new(self.implementation_uri.clone(), "tryResolveUri").with_args(args);
        if let Some(env) = client.env_by_uri(&self.implementation_uri) {
            options = options.with_env(env.clone());
        }

        let answer = client.invoke_wrapper(options, extension).await?.into_native()?;

        match parse_answer(&answer)? {
            ExtensionAnswer::Redirect(target) => Ok(UriPackageOrWrapper::Uri(target)),
            ExtensionAnswer::Manifest(manifest) => {
                let Some(loader) = &self.package_loader else {
                    return Err(Error::ResolutionFailed {
                        uri: uri.clone(),
                        reason: Box::new(Error::ConfigError(format!(
                            "resolver extension {} returned a manifest but no package loader is configured",
                            self.implementation_uri
                        ))),
                        history: sub_context.history(),
                    });
                };
                let reader = Arc::new(ExtensionFileReader::new(
                    self.implementation_uri.clone(),
                    uri.clone(),
                    client.to_shared(),
                ));
                let package = loader.load(manifest, reader)?;
                Ok(UriPackageOrWrapper::Package(uri.clone(), package))
            }
            ExtensionAnswer::NoMatch => Ok(UriPackageOrWrapper::Uri(uri.clone())),
        }
    }
}

#[async_trait]
impl UriResolver for UriResolverWrapper {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let mut sub_context = context.create_sub_context();
        let result = self.resolve_with_extension(uri, client, &mut sub_context).await;

        context.track_step(
            ResolutionStep::new(uri.clone(), &result)
                .with_description(format!("ResolverExtension ({})", self.implementation_uri))
                .with_sub_history(sub_context.into_history()),
        );
        result
    }
}

fn parse_answer(answer: &Value) -> Result<ExtensionAnswer> {
    if answer.is_nil() {
        return Ok(ExtensionAnswer::NoMatch);
    }
    if !answer.is_map() {
        return Err(Error::EncodingFailed(format!(
            "tryResolveUri returned {answer}, expected a map"
        )));
    }

    match map_get(answer, "uri") {
        None | Some(Value::Nil) => {}
        Some(Value::String(s)) => {
            let target = s
                .as_str()
                .ok_or_else(|| Error::EncodingFailed("tryResolveUri returned a non utf-8 uri".into()))?;
            return Ok(ExtensionAnswer::Redirect(Uri::parse(target)?));
        }
        Some(other) => {
            return Err(Error::EncodingFailed(format!("expected uri to be a string, got {other}")));
        }
    }

    match map_get(answer, "manifest") {
        None | Some(Value::Nil) => Ok(ExtensionAnswer::NoMatch),
        Some(Value::Binary(bytes)) => Ok(ExtensionAnswer::Manifest(bytes.clone())),
        Some(other) => Err(Error::EncodingFailed(format!(
            "expected manifest to be bytes, got {other}"
        ))),
    }
}
