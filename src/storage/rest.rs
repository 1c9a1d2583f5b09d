//! Hosted REST link table
//!
//! Talks to a PostgREST-style endpoint (`{base}/rest/v1/{table}`), the API
//! shape exposed by managed Postgres services. Row-level security on the
//! server decides what the bearer token may see and change.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{
    LinkChanges, LinkRecord, LinkTable, NewLinkRow, StoreError, StoreErrorCode, StoreResult,
};

/// Postgres SQLSTATE for unique_violation
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for insufficient_privilege
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";
/// PostgREST code for "no rows / more than one row" on single-object requests
const PGRST_NO_ROWS: &str = "PGRST116";

/// Error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

struct RestRequest {
    method: Method,
    url: String,
    body: Option<serde_json::Value>,
    return_representation: bool,
}

pub struct RestTable {
    endpoint: String,
    api_key: String,
    bearer: String,
    agent: Agent,
}

impl RestTable {
    /// `access_token` is the signed-in user's token; without it requests carry
    /// only the project key and run as the anonymous role.
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: String,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        let bearer = access_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| api_key.clone());

        Self {
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key,
            bearer,
            agent,
        }
    }

    fn url(&self, params: &[(&str, String)]) -> String {
        build_url(&self.endpoint, params)
    }

    async fn send(&self, request: RestRequest) -> StoreResult<String> {
        let agent = self.agent.clone();
        let api_key = self.api_key.clone();
        let bearer = self.bearer.clone();

        // ureq 是同步客户端，放到阻塞线程池中执行
        tokio::task::spawn_blocking(move || execute(&agent, &api_key, &bearer, request))
            .await
            .unwrap_or_else(|e| {
                warn!("REST request task failed: {}", e);
                Err(StoreError::transport(format!("request task failed: {}", e)))
            })
    }

    async fn send_for_rows(&self, request: RestRequest) -> StoreResult<Vec<LinkRecord>> {
        let body = self.send(request).await?;
        parse_rows(&body)
    }
}

fn build_url(endpoint: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{}?{}", endpoint, query.join("&"))
}

/// PostgREST 过滤条件，值需要 URL 编码
fn filter(op: &str, value: &str) -> String {
    format!("{}.{}", op, urlencoding::encode(value))
}

fn execute(
    agent: &Agent,
    api_key: &str,
    bearer: &str,
    request: RestRequest,
) -> StoreResult<String> {
    let authorization = format!("Bearer {}", bearer);
    let prefer = if request.return_representation {
        "return=representation"
    } else {
        "return=minimal"
    };

    trace!("REST {:?} {}", request.method, request.url);

    let result = match request.method {
        Method::Get => agent
            .get(&request.url)
            .header("apikey", api_key)
            .header("Authorization", &authorization)
            .header("Accept", "application/json")
            .call(),
        Method::Delete => agent
            .delete(&request.url)
            .header("apikey", api_key)
            .header("Authorization", &authorization)
            .header("Prefer", prefer)
            .call(),
        Method::Post | Method::Patch => {
            let builder = if request.method == Method::Post {
                agent.post(&request.url)
            } else {
                agent.patch(&request.url)
            };
            let body = request.body.unwrap_or(serde_json::Value::Null);
            builder
                .header("apikey", api_key)
                .header("Authorization", &authorization)
                .header("Prefer", prefer)
                .send_json(&body)
        }
    };

    let response = result.map_err(|e| StoreError::transport(format!("request failed: {}", e)))?;
    let status = response.status().as_u16();
    let text = response
        .into_body()
        .read_to_string()
        .map_err(|e| StoreError::transport(format!("failed to read response: {}", e)))?;

    if (200..300).contains(&status) {
        Ok(text)
    } else {
        Err(classify_error(status, &text))
    }
}

/// 将 HTTP 状态码和 PostgREST 错误体映射为 StoreError
fn classify_error(status: u16, body: &str) -> StoreError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let sql_code = parsed.code.as_deref().unwrap_or_default();

    let code = match (status, sql_code) {
        (_, PG_UNIQUE_VIOLATION) => StoreErrorCode::UniqueViolation,
        (_, PG_INSUFFICIENT_PRIVILEGE) | (401, _) | (403, _) => StoreErrorCode::PermissionDenied,
        (_, PGRST_NO_ROWS) | (404, _) => StoreErrorCode::NotFound,
        (502..=504, _) => StoreErrorCode::Transport,
        _ => StoreErrorCode::Other,
    };

    let mut message = parsed
        .message
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body.trim()));
    if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
        message = format!("{} ({})", message, details);
    }
    if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
        message = format!("{}; hint: {}", message, hint);
    }

    StoreError::new(code, message)
}

fn parse_rows(body: &str) -> StoreResult<Vec<LinkRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body)
        .map_err(|e| StoreError::other(format!("unexpected response body: {}", e)))
}

#[async_trait]
impl LinkTable for RestTable {
    async fn select_by_owner(&self, owner: &str) -> StoreResult<Vec<LinkRecord>> {
        let url = self.url(&[
            ("select", "*".to_string()),
            ("user_id", filter("eq", owner)),
            ("order", "created_at.desc".to_string()),
        ]);
        let rows = self
            .send_for_rows(RestRequest {
                method: Method::Get,
                url,
                body: None,
                return_representation: false,
            })
            .await?;
        debug!("REST: loaded {} links", rows.len());
        Ok(rows)
    }

    async fn select_by_id(&self, id: &str) -> StoreResult<Option<LinkRecord>> {
        let url = self.url(&[("select", "*".to_string()), ("id", filter("eq", id))]);
        let rows = self
            .send_for_rows(RestRequest {
                method: Method::Get,
                url,
                body: None,
                return_representation: false,
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn select_ids_by_alias(
        &self,
        alias: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        #[derive(Deserialize)]
        struct IdRow {
            id: String,
        }

        let mut params = vec![("select", "id".to_string()), ("alias", filter("eq", alias))];
        if let Some(id) = exclude_id {
            params.push(("id", filter("neq", id)));
        }

        let body = self
            .send(RestRequest {
                method: Method::Get,
                url: self.url(&params),
                body: None,
                return_representation: false,
            })
            .await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<IdRow> = serde_json::from_str(&body)
            .map_err(|e| StoreError::other(format!("unexpected response body: {}", e)))?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn insert(&self, row: NewLinkRow) -> StoreResult<LinkRecord> {
        let body = serde_json::to_value(&row)
            .map_err(|e| StoreError::other(format!("failed to encode row: {}", e)))?;
        let rows = self
            .send_for_rows(RestRequest {
                method: Method::Post,
                url: self.url(&[("select", "*".to_string())]),
                body: Some(body),
                return_representation: true,
            })
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::other("insert returned no row"))
    }

    async fn update(&self, id: &str, changes: LinkChanges) -> StoreResult<Option<LinkRecord>> {
        let body = serde_json::to_value(&changes)
            .map_err(|e| StoreError::other(format!("failed to encode changes: {}", e)))?;
        let rows = self
            .send_for_rows(RestRequest {
                method: Method::Patch,
                url: self.url(&[("select", "*".to_string()), ("id", filter("eq", id))]),
                body: Some(body),
                return_representation: true,
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.send(RestRequest {
            method: Method::Delete,
            url: self.url(&[("id", filter("eq", id))]),
            body: None,
            return_representation: false,
        })
        .await
        .map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_and_bearer() {
        let table = RestTable::new(
            "https://project.example.co/",
            "links",
            "anon-key".to_string(),
            None,
            5,
        );
        assert_eq!(table.endpoint, "https://project.example.co/rest/v1/links");
        assert_eq!(table.bearer, "anon-key");

        let table = RestTable::new(
            "https://project.example.co",
            "links",
            "anon-key".to_string(),
            Some("user-token".to_string()),
            5,
        );
        assert_eq!(table.bearer, "user-token");
    }

    #[test]
    fn test_filters_are_encoded() {
        let url = build_url(
            "https://h/rest/v1/links",
            &[
                ("select", "id".to_string()),
                ("alias", filter("eq", "a&b=c")),
                ("id", filter("neq", "42")),
            ],
        );
        assert_eq!(
            url,
            "https://h/rest/v1/links?select=id&alias=eq.a%26b%3Dc&id=neq.42"
        );
    }

    #[test]
    fn test_classify_unique_violation() {
        let body = r#"{"code":"23505","details":"Key (alias)=(promo) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"links_alias_key\""}"#;
        let err = classify_error(409, body);
        assert!(err.is_unique_violation());
        assert!(err.message.contains("already exists"));
    }

    #[test]
    fn test_classify_permission_and_other() {
        let err = classify_error(401, r#"{"message":"JWT expired","code":"PGRST301"}"#);
        assert_eq!(err.code, StoreErrorCode::PermissionDenied);

        let err = classify_error(
            403,
            r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
        );
        assert_eq!(err.code, StoreErrorCode::PermissionDenied);

        let err = classify_error(500, "internal failure");
        assert_eq!(err.code, StoreErrorCode::Other);
        assert!(err.message.contains("HTTP 500"));

        let err = classify_error(503, "");
        assert_eq!(err.code, StoreErrorCode::Transport);
    }

    #[test]
    fn test_parse_rows() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("[]").unwrap().is_empty());

        let body = r#"[{"id":"9b1d","user_id":"u1","alias":"promo","original_url":"https://a.example","visit_count":2,"created_at":"2026-10-01T08:00:00.123456+00:00","updated_at":"2026-10-02T08:00:00+00:00"}]"#;
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].alias, "promo");
        assert_eq!(rows[0].visit_count, 2);

        assert!(parse_rows("{not json").is_err());
    }
}
