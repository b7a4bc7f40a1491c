//! Query orchestration
//!
//! A query is parsed into named invocations by an external [`QueryParser`];
//! every invocation runs concurrently and the outcomes are merged by name.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::join_all;
use rmpv::Value;

use super::{WrapClient, bridge};
use crate::error::{Error, Result};
use crate::interfaces::CoreClient;
use crate::interfaces::query::{QueryInvocations, QueryParser};
use crate::types::InvokeValue;
use crate::uri::Uri;

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub uri: Uri,
    pub query: String,
    pub variables: BTreeMap<String, Value>,
}

impl QueryOptions {
    pub fn new(uri: Uri, query: impl Into<String>) -> Self {
        Self {
            uri,
            query: query.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }
}

/// Merged outcome of a query.
///
/// `data` and `errors` are independent: a failed invocation has no entry in
/// `data`.
#[derive(Debug, Default)]
pub struct QueryResult {
    pub data: BTreeMap<String, InvokeValue>,
    pub errors: Vec<Error>,
}

impl QueryResult {
    fn from_error(error: Error) -> Self {
        Self {
            data: BTreeMap::new(),
            errors: vec![error],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Treat any error as fatal
    pub fn into_result(self) -> Result<BTreeMap<String, InvokeValue>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(Error::AggregateQueryErrors(self.errors))
        }
    }
}

impl WrapClient {
    /// Parse and run a query. Never fails outright; every failure lands in
    /// [`QueryResult::errors`].
    pub async fn query(&self, options: QueryOptions) -> QueryResult {
        let run = async {
            let parser = self
                .config()
                .query_parser
                .as_ref()
                .ok_or_else(|| Error::QueryParseFailed("no query parser configured".to_string()))?;
            let plan = parse(parser.as_ref(), &options)?;
            Ok::<_, Error>(self.execute_query_plan(&options.uri, plan).await)
        };

        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => QueryResult::from_error(error),
            Err(panic) => QueryResult::from_error(bridge::fault(&options.uri, "query", panic)),
        }
    }

    /// Run an already parsed plan, one concurrent invocation per entry
    pub async fn execute_query_plan(&self, uri: &Uri, plan: QueryInvocations) -> QueryResult {
        tracing::debug!("executing {} invocation(s) for {}", plan.len(), uri);

        let invocations = plan
            .into_iter()
            .map(|(name, options)| async move { (name, self.invoke(options).await) });

        let mut result = QueryResult::default();
        for (name, outcome) in join_all(invocations).await {
            match outcome {
                Ok(value) => {
                    result.data.insert(name, value);
                }
                Err(error) => {
                    tracing::warn!("query invocation {} failed: {}", name, error);
                    result.errors.push(error);
                }
            }
        }
        result
    }
}

fn parse(parser: &dyn QueryParser, options: &QueryOptions) -> Result<QueryInvocations> {
    parser
        .parse(&options.uri, &options.query, &options.variables)
        .map_err(|e| match e {
            Error::QueryParseFailed(_) => e,
            other => Error::QueryParseFailed(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::ClientConfig;
    use crate::test_utils::{MockWrapper, StaticQueryParser, uri};
    use crate::types::InvokeOptions;

    fn client(parser: StaticQueryParser) -> WrapClient {
        WrapClient::new(
            ClientConfig::builder()
                .add_wrapper(uri("ens/ok"), Arc::new(MockWrapper::returning(Value::from(1))))
                .with_query_parser(Arc::new(parser))
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successes() {
        let mut plan = QueryInvocations::new();
        plan.insert("good".into(), InvokeOptions::new(uri("ens/ok"), "run"));
        plan.insert("bad".into(), InvokeOptions::new(uri("ens/missing"), "run"));

        let result = client(StaticQueryParser::new(plan))
            .query(QueryOptions::new(uri("ens/ok"), "{ good bad }"))
            .await;

        assert_eq!(result.data.keys().collect::<Vec<_>>(), vec!["good"]);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], Error::UriNotFound { .. }));
        assert!(matches!(result.into_result(), Err(Error::AggregateQueryErrors(errors)) if errors.len() == 1));
    }

    #[tokio::test]
    async fn test_parse_failure_short_circuits() {
        let result = client(StaticQueryParser::failing("unexpected token"))
            .query(QueryOptions::new(uri("ens/ok"), "{"))
            .await;

        assert!(result.data.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], Error::QueryParseFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_parser_is_reported() {
        let client = WrapClient::new(ClientConfig::builder().build().unwrap());
        let result = client.query(QueryOptions::new(uri("ens/ok"), "{ x }")).await;
        assert!(matches!(result.errors.as_slice(), [Error::QueryParseFailed(_)]));
    }

    #[tokio::test]
    async fn test_panicking_parser_is_caught() {
        let result = client(StaticQueryParser::panicking())
            .query(QueryOptions::new(uri("ens/ok"), "{ x }"))
            .await;
        assert_eq!(result.errors.len(), 1);
        assert!(result.data.is_empty());
    }
}
