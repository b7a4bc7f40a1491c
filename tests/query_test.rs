//! Query orchestration over a pre-parsed plan

mod common;

use std::sync::Arc;

use common::{ConstWrapper, PlanParser, uri};
use wrapline::interfaces::query::QueryInvocations;
use wrapline::{ClientConfig, Error, InvokeOptions, QueryOptions, Value, WrapClient};

fn plan() -> QueryInvocations {
    let mut plan = QueryInvocations::new();
    plan.insert("first".into(), InvokeOptions::new(uri("ens/app"), "first"));
    plan.insert("second".into(), InvokeOptions::new(uri("ens/app"), "second"));
    plan.insert("broken".into(), InvokeOptions::new(uri("ens/gone"), "third"));
    plan
}

#[tokio::test]
async fn test_partial_success() {
    let client = WrapClient::new(
        ClientConfig::builder()
            .add_wrapper(uri("ens/app"), ConstWrapper::native(Value::from(true)))
            .with_query_parser(Arc::new(PlanParser(plan())))
            .build()
            .unwrap(),
    );

    let result = client
        .query(QueryOptions::new(uri("ens/app"), "query { first second broken }"))
        .await;

    assert_eq!(result.data.len(), 2);
    assert!(result.data.contains_key("first"));
    assert!(result.data.contains_key("second"));
    assert!(!result.data.contains_key("broken"));
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], Error::UriNotFound { .. }));
    assert!(!result.is_ok());
}

#[tokio::test]
async fn test_execute_plan_without_parser() {
    let client = WrapClient::new(
        ClientConfig::builder()
            .add_wrapper(uri("ens/app"), ConstWrapper::native(Value::from(1)))
            .add_wrapper(uri("ens/gone"), ConstWrapper::native(Value::from(2)))
            .build()
            .unwrap(),
    );

    let data = client
        .execute_query_plan(&uri("ens/app"), plan())
        .await
        .into_result()
        .unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data["broken"].as_native(), Some(&Value::from(2)));
}
