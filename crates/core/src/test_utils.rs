//! In-memory collaborators for unit tests

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rmpv::Value;

use crate::error::{Error, Result};
use crate::interfaces::query::{QueryInvocations, QueryParser};
use crate::interfaces::{CoreClient, UriResolver, WrapPackage, Wrapper};
use crate::resolution::ResolutionContext;
use crate::types::{FileContent, GetFileOptions, InvokeArgs, InvokeOptions, InvokeValue, UriPackageOrWrapper};
use crate::uri::Uri;

pub fn uri(s: &str) -> Uri {
    Uri::parse(s).unwrap()
}

#[derive(Clone)]
enum Behavior {
    Return(InvokeValue),
    Fail(String),
    Panic(String),
    EchoEnv,
    EchoArgs,
}

#[derive(Clone)]
pub struct MockWrapper {
    behavior: Behavior,
}

impl MockWrapper {
    pub fn returning(value: Value) -> Self {
        Self {
            behavior: Behavior::Return(InvokeValue::Native(value)),
        }
    }

    pub fn returning_encoded(bytes: Vec<u8>) -> Self {
        Self {
            behavior: Behavior::Return(InvokeValue::Encoded(bytes)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: Behavior::Fail(message.to_string()),
        }
    }

    pub fn panicking(message: &str) -> Self {
        Self {
            behavior: Behavior::Panic(message.to_string()),
        }
    }

    pub fn echo_env() -> Self {
        Self {
            behavior: Behavior::EchoEnv,
        }
    }

    /// Answers `[received encoded, encoded bytes, native value]` of its args
    pub fn echo_args() -> Self {
        Self {
            behavior: Behavior::EchoArgs,
        }
    }
}

#[async_trait]
impl Wrapper for MockWrapper {
    async fn invoke(&self, options: &InvokeOptions, _client: &dyn CoreClient) -> Result<InvokeValue> {
        match &self.behavior {
            Behavior::Return(value) => Ok(value.clone()),
            Behavior::Fail(message) => Err(Error::WrapperInvocationFailed {
                uri: options.uri.clone(),
                method: options.method.clone(),
                message: message.clone(),
            }),
            Behavior::Panic(message) => panic!("{}", message),
            Behavior::EchoEnv => Ok(InvokeValue::Native(options.env.clone().unwrap_or(Value::Nil))),
            Behavior::EchoArgs => {
                let args = options.args.clone().unwrap_or(InvokeArgs::Value(Value::Nil));
                Ok(InvokeValue::Native(Value::Array(vec![
                    Value::Boolean(matches!(args, InvokeArgs::Encoded(_))),
                    Value::Binary(args.to_encoded()?),
                    args.to_native()?,
                ])))
            }
        }
    }

    fn manifest(&self) -> Value {
        Value::Map(vec![(Value::from("name"), Value::from("mock"))])
    }

    async fn get_file(&self, options: &GetFileOptions) -> Result<FileContent> {
        Ok(FileContent::Bytes(options.path.as_bytes().to_vec()))
    }
}

pub struct MockPackage {
    wrapper: Option<MockWrapper>,
}

impl MockPackage {
    pub fn new(wrapper: MockWrapper) -> Self {
        Self { wrapper: Some(wrapper) }
    }

    pub fn failing() -> Self {
        Self { wrapper: None }
    }
}

#[async_trait]
impl WrapPackage for MockPackage {
    async fn create_wrapper(&self) -> Result<Arc<dyn Wrapper>> {
        match &self.wrapper {
            Some(wrapper) => Ok(Arc::new(wrapper.clone())),
            None => Err(Error::PackageInstantiationFailed {
                uri: uri("mock/package"),
                message: "module is corrupt".to_string(),
            }),
        }
    }

    fn manifest(&self) -> Value {
        Value::Map(vec![(Value::from("name"), Value::from("mock"))])
    }
}

pub enum StaticQueryParser {
    Plan(QueryInvocations),
    Fail(String),
    Panic,
}

impl StaticQueryParser {
    pub fn new(plan: QueryInvocations) -> Self {
        StaticQueryParser::Plan(plan)
    }

    pub fn failing(message: &str) -> Self {
        StaticQueryParser::Fail(message.to_string())
    }

    pub fn panicking() -> Self {
        StaticQueryParser::Panic
    }
}

impl QueryParser for StaticQueryParser {
    fn parse(&self, _uri: &Uri, _query: &str, _variables: &BTreeMap<String, Value>) -> Result<QueryInvocations> {
        match self {
            StaticQueryParser::Plan(plan) => Ok(plan.clone()),
            StaticQueryParser::Fail(message) => Err(Error::QueryParseFailed(message.clone())),
            StaticQueryParser::Panic => panic!("parser exploded"),
        }
    }
}

/// Package that counts how often it was instantiated
pub struct CountingPackage {
    pub created: std::sync::atomic::AtomicUsize,
    value: Value,
}

impl CountingPackage {
    pub fn new(value: Value) -> Self {
        Self {
            created: std::sync::atomic::AtomicUsize::new(0),
            value,
        }
    }

    pub fn count(&self) -> usize {
        self.created.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl WrapPackage for CountingPackage {
    async fn create_wrapper(&self) -> Result<Arc<dyn Wrapper>> {
        self.created.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(Arc::new(MockWrapper::returning(self.value.clone())))
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }
}

/// Resolver extension answering `tryResolveUri` from a table keyed by path
/// and serving every `getFile` request with the requested path as bytes
pub struct MockExtension {
    answers: BTreeMap<String, Value>,
    file_answer: Option<Value>,
}

impl MockExtension {
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
            file_answer: None,
        }
    }

    /// Answer every `getFile` with `value` instead of the path bytes
    pub fn file_answer(mut self, value: Value) -> Self {
        self.file_answer = Some(value);
        self
    }

    pub fn redirect(mut self, path: &str, to: &str) -> Self {
        self.answers.insert(
            path.to_string(),
            Value::Map(vec![(Value::from("uri"), Value::from(to))]),
        );
        self
    }

    pub fn manifest(mut self, path: &str, manifest: &[u8]) -> Self {
        self.answers.insert(
            path.to_string(),
            Value::Map(vec![
                (Value::from("uri"), Value::Nil),
                (Value::from("manifest"), Value::Binary(manifest.to_vec())),
            ]),
        );
        self
    }
}

#[async_trait]
impl Wrapper for MockExtension {
    async fn invoke(&self, options: &InvokeOptions, _client: &dyn CoreClient) -> Result<InvokeValue> {
        let args = match &options.args {
            Some(args) => args.to_native()?,
            None => Value::Nil,
        };
        let arg = |key: &str| {
            crate::codec::map_get(&args, key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        match options.method.as_str() {
            "tryResolveUri" => Ok(InvokeValue::Native(
                self.answers.get(&arg("path")).cloned().unwrap_or(Value::Nil),
            )),
            "getFile" => Ok(InvokeValue::Native(match &self.file_answer {
                Some(value) => value.clone(),
                None => Value::Binary(arg("path").into_bytes()),
            })),
            other => panic!("unexpected method {other}"),
        }
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }

    async fn get_file(&self, options: &GetFileOptions) -> Result<FileContent> {
        Err(Error::FileNotFound(options.path.clone()))
    }
}

/// Loader whose packages read `module.wasm` through the file reader and
/// return its contents from every invocation
pub struct MockLoader;

struct ReaderPackage {
    manifest: Vec<u8>,
    reader: Arc<dyn crate::interfaces::FileReader>,
}

impl crate::interfaces::ManifestPackageLoader for MockLoader {
    fn load(
        &self,
        manifest: Vec<u8>,
        reader: Arc<dyn crate::interfaces::FileReader>,
    ) -> Result<Arc<dyn WrapPackage>> {
        Ok(Arc::new(ReaderPackage { manifest, reader }))
    }
}

#[async_trait]
impl WrapPackage for ReaderPackage {
    async fn create_wrapper(&self) -> Result<Arc<dyn Wrapper>> {
        let module = self.reader.read_file("module.wasm").await?;
        Ok(Arc::new(MockWrapper::returning(Value::Binary(module))))
    }

    fn manifest(&self) -> Value {
        Value::Binary(self.manifest.clone())
    }
}

/// Resolver that panics on its first `faults` calls and reports no match after
pub struct FaultyResolver {
    faults: std::sync::atomic::AtomicUsize,
}

impl FaultyResolver {
    pub fn new(faults: usize) -> Self {
        Self {
            faults: std::sync::atomic::AtomicUsize::new(faults),
        }
    }
}

#[async_trait]
impl UriResolver for FaultyResolver {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        _client: &dyn CoreClient,
        _context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper> {
        let remaining = self.faults.load(std::sync::atomic::Ordering::SeqCst);
        if remaining > 0 {
            self.faults.store(remaining - 1, std::sync::atomic::Ordering::SeqCst);
            panic!("transient fault");
        }
        Ok(UriPackageOrWrapper::Uri(uri.clone()))
    }
}

/// Package whose instantiation panics
pub struct PanickingPackage;

#[async_trait]
impl WrapPackage for PanickingPackage {
    async fn create_wrapper(&self) -> Result<Arc<dyn Wrapper>> {
        panic!("instantiation fault")
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }
}
