//! Shared in-memory wrappers for the integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use wrapline::{
    CoreClient, Error, FileContent, GetFileOptions, InvokeOptions, InvokeValue, QueryParser, Result,
    Uri, Value, Wrapper,
};
use wrapline::interfaces::query::QueryInvocations;

pub fn uri(s: &str) -> Uri {
    Uri::parse(s).unwrap()
}

/// Returns a fixed value, native or encoded
pub struct ConstWrapper(pub InvokeValue);

impl ConstWrapper {
    pub fn native(value: Value) -> Arc<Self> {
        Arc::new(Self(InvokeValue::Native(value)))
    }

    pub fn encoded(bytes: Vec<u8>) -> Arc<Self> {
        Arc::new(Self(InvokeValue::Encoded(bytes)))
    }
}

#[async_trait]
impl Wrapper for ConstWrapper {
    async fn invoke(&self, _options: &InvokeOptions, _client: &dyn CoreClient) -> Result<InvokeValue> {
        Ok(self.0.clone())
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }

    async fn get_file(&self, options: &GetFileOptions) -> Result<FileContent> {
        Err(Error::FileNotFound(options.path.clone()))
    }
}

/// Returns the env it was invoked with
pub struct EnvWrapper;

#[async_trait]
impl Wrapper for EnvWrapper {
    async fn invoke(&self, options: &InvokeOptions, _client: &dyn CoreClient) -> Result<InvokeValue> {
        Ok(InvokeValue::Native(options.env.clone().unwrap_or(Value::Nil)))
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }

    async fn get_file(&self, _options: &GetFileOptions) -> Result<FileContent> {
        Ok(FileContent::Text("env".to_string()))
    }
}

/// Forwards every call to another uri through the client it was given
pub struct ForwardingWrapper(pub Uri);

#[async_trait]
impl Wrapper for ForwardingWrapper {
    async fn invoke(&self, options: &InvokeOptions, client: &dyn CoreClient) -> Result<InvokeValue> {
        client
            .invoke(InvokeOptions::new(self.0.clone(), options.method.clone()))
            .await
    }

    fn manifest(&self) -> Value {
        Value::Nil
    }

    async fn get_file(&self, options: &GetFileOptions) -> Result<FileContent> {
        Err(Error::FileNotFound(options.path.clone()))
    }
}

/// Hands out a prepared plan regardless of the query text
pub struct PlanParser(pub QueryInvocations);

impl QueryParser for PlanParser {
    fn parse(&self, _uri: &Uri, _query: &str, _variables: &BTreeMap<String, Value>) -> Result<QueryInvocations> {
        Ok(self.0.clone())
    }
}

pub fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (Value::from(*k), v.clone()))
            .collect(),
    )
}
