//! Invocation options and results

use rmpv::Value;

use crate::codec;
use crate::error::Result;
use crate::uri::Uri;

/// Arguments of one invocation, either native or already encoded
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeArgs {
    Value(Value),
    Encoded(Vec<u8>),
}

impl InvokeArgs {
    /// Native view of the arguments, decoding them if needed
    pub fn to_native(&self) -> Result<Value> {
        match self {
            InvokeArgs::Value(value) => Ok(value.clone()),
            InvokeArgs::Encoded(bytes) => codec::decode(bytes),
        }
    }

    /// Encoded view of the arguments, encoding them if needed
    pub fn to_encoded(&self) -> Result<Vec<u8>> {
        match self {
            InvokeArgs::Value(value) => codec::encode(value),
            InvokeArgs::Encoded(bytes) => Ok(bytes.clone()),
        }
    }
}

/// One method call on a wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeOptions {
    pub uri: Uri,
    pub method: String,
    pub args: Option<InvokeArgs>,
    /// Explicit environment; when absent the client derives one from the resolution path
    pub env: Option<Value>,
    /// Caller wants the result as encoded bytes
    pub encode_result: bool,
}

impl InvokeOptions {
    pub fn new(uri: Uri, method: impl Into<String>) -> Self {
        Self {
            uri,
            method: method.into(),
            args: None,
            env: None,
            encode_result: false,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(InvokeArgs::Value(args));
        self
    }

    pub fn with_encoded_args(mut self, args: Vec<u8>) -> Self {
        self.args = Some(InvokeArgs::Encoded(args));
        self
    }

    pub fn with_env(mut self, env: Value) -> Self {
        self.env = Some(env);
        self
    }

    pub fn encode_result(mut self, encode: bool) -> Self {
        self.encode_result = encode;
        self
    }
}

/// Successful invocation value. The variant is the authoritative encoded flag.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeValue {
    Native(Value),
    Encoded(Vec<u8>),
}

impl InvokeValue {
    pub fn is_encoded(&self) -> bool {
        matches!(self, InvokeValue::Encoded(_))
    }

    pub fn as_native(&self) -> Option<&Value> {
        match self {
            InvokeValue::Native(value) => Some(value),
            InvokeValue::Encoded(_) => None,
        }
    }

    pub fn as_encoded(&self) -> Option<&[u8]> {
        match self {
            InvokeValue::Native(_) => None,
            InvokeValue::Encoded(bytes) => Some(bytes),
        }
    }

    /// Native value, decoding if the wrapper returned bytes
    pub fn into_native(self) -> Result<Value> {
        match self {
            InvokeValue::Native(value) => Ok(value),
            InvokeValue::Encoded(bytes) => codec::decode(&bytes),
        }
    }
}

pub type InvokeResult = Result<InvokeValue>;
