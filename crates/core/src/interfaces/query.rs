use std::collections::BTreeMap;

use rmpv::Value;

use crate::error::Result;
use crate::types::InvokeOptions;
use crate::uri::Uri;

/// Invocations of a parsed query, keyed by their unique name
pub type QueryInvocations = BTreeMap<String, InvokeOptions>;

/// Turns a query document into an invocation plan
pub trait QueryParser: Send + Sync {
    fn parse(&self, uri: &Uri, query: &str, variables: &BTreeMap<String, Value>) -> Result<QueryInvocations>;
}
