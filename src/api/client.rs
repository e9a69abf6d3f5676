//! Caching GraphQL client
//!
//! Every query is sent as a named operation, `<namespace>_<Name>`. The query
//! text must follow the convention `query <Name>[(<variables>)] { ... }`;
//! anonymous queries, shorthand `{ ... }` documents and mutations are
//! rejected with a `Query` error before anything is sent.

use super::transport::{GraphQLRequest, QueryTransport};
use crate::cache::{Fingerprint, ResponseCache};
use crate::{ChurrosGraphsError, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

const QUERY_KEYWORD: &str = "query";

/// A query rewritten to carry its namespaced operation name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    pub text: String,
    pub operation_name: String,
}

/// True if `s` is a GraphQL name (`[A-Za-z_][A-Za-z0-9_]*`)
pub fn is_graphql_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Prefix the operation name of `query` with `namespace`
///
/// A name already carrying the prefix is left alone.
pub fn name_query(query: &str, namespace: &str) -> Result<NamedQuery> {
    let body = query.trim_start();

    let after_keyword = body
        .strip_prefix(QUERY_KEYWORD)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .ok_or_else(|| {
            ChurrosGraphsError::Query(format!(
                "expected `{} <Name>` at the start of the query, found: {}",
                QUERY_KEYWORD,
                first_line(body)
            ))
        })?
        .trim_start();

    let name_len = after_keyword
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after_keyword.len());
    let (name, rest) = after_keyword.split_at(name_len);

    if !is_graphql_name(name) {
        return Err(ChurrosGraphsError::Query(format!(
            "query has no operation name: {}",
            first_line(body)
        )));
    }

    let prefix = format!("{}_", namespace);
    let operation_name = if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    };

    Ok(NamedQuery {
        text: format!("{} {}{}", QUERY_KEYWORD, operation_name, rest),
        operation_name,
    })
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("").trim()
}

/// Cache lookups for a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClientStats {
    pub hits: usize,
    pub misses: usize,
}

/// GraphQL client answering from the response cache when it can
pub struct QueryClient<T: QueryTransport> {
    transport: T,
    cache: ResponseCache,
    namespace: String,
    stats: ClientStats,
}

impl<T: QueryTransport> QueryClient<T> {
    pub fn new(transport: T, cache: ResponseCache, namespace: impl Into<String>) -> Self {
        Self {
            transport,
            cache,
            namespace: namespace.into(),
            stats: ClientStats::default(),
        }
    }

    /// Run `query` with `variables`, from cache when possible
    ///
    /// On a miss the response is fetched, checked and stored before being
    /// returned. Responses without `data` are errors and are never cached.
    pub async fn execute(&mut self, query: &str, variables: Value) -> Result<Value> {
        let named = name_query(query, &self.namespace)?;
        let fingerprint = Fingerprint::new(&named.text, &variables);

        if let Some(cached) = self.cache.get(&fingerprint) {
            self.stats.hits += 1;
            debug!(operation = %named.operation_name, "Response cache hit");
            check_response(cached, &named.operation_name)?;
            return Ok(cached.clone());
        }

        self.stats.misses += 1;
        info!(operation = %named.operation_name, "Response cache miss, querying API");

        let request = GraphQLRequest {
            query: named.text,
            operation_name: named.operation_name,
            variables,
        };
        let response = self.transport.send(&request).await?;
        check_response(&response, &request.operation_name)?;

        self.cache.put(fingerprint, response.clone())?;
        Ok(response)
    }

    pub fn stats(&self) -> ClientStats {
        self.stats
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Fail unless the response carries a non-null `data` member
fn check_response(response: &Value, operation: &str) -> Result<()> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect();
        if !errors.is_empty() {
            warn!(operation = %operation, errors = %messages.join("; "), "GraphQL errors in response");
        }
    }

    match response.get("data") {
        Some(data) if !data.is_null() => Ok(()),
        _ => Err(ChurrosGraphsError::Transport(format!(
            "response to {} has no data",
            operation
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FakeTransport {
        response: Value,
        calls: AtomicUsize,
        last: Mutex<Option<GraphQLRequest>>,
    }

    impl FakeTransport {
        fn new(response: Value) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl QueryTransport for FakeTransport {
        async fn send(&self, request: &GraphQLRequest) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            Ok(self.response.clone())
        }
    }

    fn client(dir: &TempDir, response: Value) -> QueryClient<FakeTransport> {
        let cache = ResponseCache::open(dir.path().join("cache.json")).unwrap();
        QueryClient::new(FakeTransport::new(response), cache, "ChurrosGraphs")
    }

    #[test]
    fn test_name_query() {
        let named = name_query(
            "\n  query Memberships($types: [GroupType!]!) {\n groups(types: $types) { name } }",
            "ChurrosGraphs",
        )
        .unwrap();
        assert_eq!(named.operation_name, "ChurrosGraphs_Memberships");
        assert!(named
            .text
            .starts_with("query ChurrosGraphs_Memberships($types: [GroupType!]!) {"));
    }

    #[test]
    fn test_name_query_without_variables() {
        let named = name_query("query Groups{ groups { name } }", "NS").unwrap();
        assert_eq!(named.operation_name, "NS_Groups");
        assert_eq!(named.text, "query NS_Groups{ groups { name } }");
    }

    #[test]
    fn test_name_query_is_idempotent() {
        let once = name_query("query Groups { groups { name } }", "NS").unwrap();
        let twice = name_query(&once.text, "NS").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_name_query_rejects_convention_violations() {
        for query in [
            "{ groups { name } }",
            "query { groups { name } }",
            "query($t: Int) { groups { name } }",
            "mutation Login { login }",
            "queryGroups { groups { name } }",
            "",
        ] {
            assert!(
                matches!(name_query(query, "NS"), Err(ChurrosGraphsError::Query(_))),
                "accepted: {:?}",
                query
            );
        }
    }

    #[test]
    fn test_is_graphql_name() {
        assert!(is_graphql_name("ChurrosGraphs"));
        assert!(is_graphql_name("_private1"));
        assert!(!is_graphql_name("1abc"));
        assert!(!is_graphql_name("with space"));
        assert!(!is_graphql_name(""));
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let response = json!({"data": {"groups": []}});
        let mut client = client(&dir, response.clone());

        let query = "query Groups { groups { name } }";
        let first = client.execute(query, json!({"a": 1, "b": 2})).await.unwrap();
        let second = client.execute(query, json!({"b": 2, "a": 1})).await.unwrap();

        assert_eq!(first, response);
        assert_eq!(second, response);
        assert_eq!(client.transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.stats(), ClientStats { hits: 1, misses: 1 });
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_operation_name() {
        let dir = TempDir::new().unwrap();
        let mut client = client(&dir, json!({"data": {}}));

        client
            .execute("query Groups { groups { name } }", json!({}))
            .await
            .unwrap();

        let sent = client.transport.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.operation_name, "ChurrosGraphs_Groups");
        assert!(sent.query.starts_with("query ChurrosGraphs_Groups"));
    }

    #[tokio::test]
    async fn test_missing_data_is_an_error_and_not_cached() {
        let dir = TempDir::new().unwrap();
        let mut client = client(
            &dir,
            json!({"data": null, "errors": [{"message": "Unauthorized"}]}),
        );

        let result = client.execute("query Groups { groups { name } }", json!({})).await;
        assert!(matches!(result, Err(ChurrosGraphsError::Transport(_))));
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_never_reaches_transport() {
        let dir = TempDir::new().unwrap();
        let mut client = client(&dir, json!({"data": {}}));

        let result = client.execute("{ groups { name } }", json!({})).await;
        assert!(matches!(result, Err(ChurrosGraphsError::Query(_))));
        assert_eq!(client.transport.calls.load(Ordering::SeqCst), 0);
    }
}
