//! Encoding bridge between callers and wrappers

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::codec;
use crate::error::{Error, Result};
use crate::interfaces::{CoreClient, Wrapper};
use crate::types::{InvokeOptions, InvokeResult, InvokeValue};
use crate::uri::Uri;

/// Call `wrapper` and reconcile its result with what the caller asked for.
///
/// Wrapper errors pass through untouched; a panic becomes
/// [`Error::WrapperInvocationFailed`].
pub(crate) async fn invoke_wrapper(
    client: &dyn CoreClient,
    options: InvokeOptions,
    wrapper: Arc<dyn Wrapper>,
) -> InvokeResult {
    let uri = options.uri.clone();
    let method = options.method.clone();

    let call = async {
        let value = wrapper.invoke(&options, client).await?;
        negotiate(value, options.encode_result)
    };

    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(fault(&uri, &method, panic)),
    }
}

/// Encode native results for callers that want bytes, decode encoded results
/// for callers that don't. Anything else is returned as is.
pub fn negotiate(value: InvokeValue, encode_result: bool) -> Result<InvokeValue> {
    match (value, encode_result) {
        (InvokeValue::Native(value), true) => Ok(InvokeValue::Encoded(codec::encode(&value)?)),
        (InvokeValue::Encoded(bytes), false) => Ok(InvokeValue::Native(codec::decode(&bytes)?)),
        (value, _) => Ok(value),
    }
}

/// Convert a caught panic into an invocation error
pub(crate) fn fault(uri: &Uri, method: &str, panic: Box<dyn Any + Send>) -> Error {
    let message = panic_message(panic.as_ref());
    tracing::error!("{}.{} panicked: {}", uri, method, message);
    Error::WrapperInvocationFailed {
        uri: uri.clone(),
        method: method.to_string(),
        message,
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
