use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use serde_json::{json, Value};

use crate::config::GithubConfig;
use crate::query::{RequestClient, RequestError};

use super::error::ClientError;
use super::request::{expand_path, scalar_text, ParsedQuery};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// [`RequestClient`] backed by the GitHub REST and GraphQL APIs.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    token_env_var: String,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent.trim())
                .map_err(|_| ClientError::InvalidHeader { name: "User-Agent" })?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            api_url: config.api_url.trim().trim_end_matches('/').to_string(),
            token: config.resolve_token(),
            token_env_var: config.token_env_var.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Run a query and return the response body as JSON.
    pub async fn execute(&self, query: &str, variables: &Value) -> Result<Value, ClientError> {
        match ParsedQuery::parse(query)? {
            ParsedQuery::Rest { method, path } => self.rest(method, &path, variables).await,
            ParsedQuery::GraphQl { document } => self.graphql(&document, variables).await,
        }
    }

    async fn rest(&self, method: Method, path: &str, variables: &Value) -> Result<Value, ClientError> {
        let route = expand_path(path, variables)?;
        let mut url = self.endpoint(&route.segments)?;

        let sends_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);
        if !sends_body && !route.remaining.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &route.remaining {
                pairs.append_pair(name, &scalar_text(value));
            }
        }

        tracing::debug!(%method, %url, "GitHub REST request");

        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if sends_body {
            builder = builder.json(&Value::Object(route.remaining));
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Connection { source })?;
        read_json(response).await
    }

    async fn graphql(&self, document: &str, variables: &Value) -> Result<Value, ClientError> {
        let token = self.token.as_ref().ok_or_else(|| ClientError::MissingToken {
            env_var: self.token_env_var.clone(),
        })?;
        let url = self.endpoint(["graphql"])?;

        tracing::debug!(%url, "GitHub GraphQL request");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(|source| ClientError::Connection { source })?;

        let mut body = read_json(response).await?;
        if let Some(errors) = body.get("errors").filter(|e| !is_empty(e)) {
            let message = errors
                .get(0)
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("GraphQL request failed")
                .to_string();
            return Err(ClientError::GraphQl {
                message,
                errors: errors.clone(),
            });
        }

        Ok(body
            .as_object_mut()
            .and_then(|object| object.remove("data"))
            .unwrap_or(Value::Null))
    }

    /// API base URL with `segments` appended, each percent-encoded as one segment.
    fn endpoint<I>(&self, segments: I) -> Result<Url, ClientError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            ClientError::InvalidQuery(format!("bad API URL '{}': {}", self.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidQuery(format!("API URL '{}' cannot take a path", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RequestClient for GitHubClient {
    async fn request(&self, query: &str, variables: &Value) -> Result<Value, RequestError> {
        self.execute(query, variables).await.map_err(RequestError::from)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Read the body, turning non-success statuses into [`ClientError::Status`].
async fn read_json(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ClientError::Connection { source })?;

    if !status.is_success() {
        let body = serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| status.canonical_reason())
            .unwrap_or("Request failed")
            .to_string();
        tracing::debug!(status = status.as_u16(), %message, "GitHub returned an error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
            body,
        });
    }

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> GithubConfig {
        GithubConfig {
            api_url: api_url.to_string(),
            token: None,
            token_env_var: "GHPROFILE_TEST_UNSET_TOKEN".to_string(),
            ..GithubConfig::default()
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = GitHubClient::new(&config("https://api.github.com/")).unwrap();
        assert_eq!(client.api_url(), "https://api.github.com");
        assert_eq!(
            client.endpoint(["users", "octocat"]).unwrap().as_str(),
            "https://api.github.com/users/octocat"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let client = GitHubClient::new(&config("https://ghe.example.com/api/v3")).unwrap();
        assert_eq!(
            client.endpoint(["search", "a b/c?"]).unwrap().as_str(),
            "https://ghe.example.com/api/v3/search/a%20b%2Fc%3F"
        );
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let mut cfg = config("https://api.github.com");
        cfg.user_agent = "bad\nagent".to_string();
        assert!(matches!(
            GitHubClient::new(&cfg),
            Err(ClientError::InvalidHeader { name: "User-Agent" })
        ));
    }

    #[test]
    fn explicit_token_is_used() {
        let mut cfg = config("https://api.github.com");
        cfg.token = Some("ghp_example".to_string());
        assert!(GitHubClient::new(&cfg).unwrap().has_token());
    }

    #[tokio::test]
    async fn graphql_without_token_fails_before_sending() {
        let client = GitHubClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client
            .execute("query { viewer { login } }", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingToken { env_var } if env_var == "GHPROFILE_TEST_UNSET_TOKEN"));
    }

    #[test]
    fn empty_errors_member_is_ignored() {
        assert!(is_empty(&json!([])));
        assert!(is_empty(&Value::Null));
        assert!(!is_empty(&json!([{"message": "boom"}])));
    }
}
