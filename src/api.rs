//! HTTP facade over the XRPL.Sale platform API
//!
//! Every CLI operation maps to one REST call here. Requests carry either
//! an `X-API-Key` header or a bearer session token; non-2xx responses are
//! surfaced as `CliError::Api` with the server's error message. No retries
//! and no caching; a failed call fails the command.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::CliError;
use crate::models::{
    ApiKeyRecord, AuthSession, AuthenticateRequest, Challenge, CreateProjectRequest, Investment,
    Paginated, PlatformAnalytics, Project, ProjectAnalytics, ProjectStats,
    RegisterWebhookRequest, UserInfo, Webhook,
};

/// How outgoing requests authenticate
#[derive(Debug, Clone)]
pub enum AuthScheme {
    None,
    ApiKey(String),
    Bearer(String),
}

/// Query parameters for list endpoints, passed through verbatim
#[derive(Debug, Clone)]
pub struct ListParams {
    pub status: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Flatten into query pairs. Unset optional filters are omitted
    /// entirely rather than sent empty.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sort_by", sort_by.clone()));
        }
        if let Some(sort_order) = &self.sort_order {
            query.push(("sort_order", sort_order.clone()));
        }
        query
    }
}

/// API client bound to one environment and one credential
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthScheme,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: AuthScheme) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.auth {
            AuthScheme::None => builder,
            AuthScheme::ApiKey(key) => builder.header("X-API-Key", key),
            AuthScheme::Bearer(token) => builder.bearer_auth(token),
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let response = builder
            .send()
            .await
            .context("Request to XRPL.Sale API failed")?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::debug!(status = status.as_u16(), %message, "API error");
            return Err(CliError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse API response")
    }

    /// Like `send` but for endpoints whose response body we discard
    async fn send_unit(&self, builder: reqwest::RequestBuilder) -> Result<()> {
        let response = builder
            .send()
            .await
            .context("Request to XRPL.Sale API failed")?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(CliError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // auth
    // ------------------------------------------------------------------

    pub async fn generate_challenge(&self, wallet_address: &str) -> Result<Challenge> {
        let body = serde_json::json!({ "walletAddress": wallet_address });
        self.send(self.request(Method::POST, "auth/challenge").json(&body))
            .await
    }

    pub async fn authenticate(&self, req: &AuthenticateRequest) -> Result<AuthSession> {
        self.send(self.request(Method::POST, "auth/login").json(req))
            .await
    }

    /// Probe whether the attached API key is accepted by the platform
    pub async fn validate_api_key(&self) -> Result<()> {
        self.send_unit(self.request(Method::GET, "auth/validate"))
            .await
    }

    pub async fn current_user(&self) -> Result<UserInfo> {
        self.send(self.request(Method::GET, "auth/me")).await
    }

    pub async fn generate_api_key(&self, name: &str) -> Result<ApiKeyRecord> {
        let body = serde_json::json!({ "name": name });
        self.send(self.request(Method::POST, "auth/api-keys").json(&body))
            .await
    }

    pub async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>> {
        self.send(self.request(Method::GET, "auth/api-keys")).await
    }

    // ------------------------------------------------------------------
    // projects
    // ------------------------------------------------------------------

    pub async fn list_projects(&self, params: &ListParams) -> Result<Paginated<Project>> {
        self.send(
            self.request(Method::GET, "projects")
                .query(&params.to_query()),
        )
        .await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        self.send(self.request(Method::GET, &format!("projects/{}", id)))
            .await
    }

    pub async fn create_project(&self, req: &CreateProjectRequest) -> Result<Project> {
        self.send(self.request(Method::POST, "projects").json(req))
            .await
    }

    pub async fn launch_project(&self, id: &str) -> Result<Project> {
        self.send(self.request(Method::POST, &format!("projects/{}/launch", id)))
            .await
    }

    pub async fn project_stats(&self, id: &str) -> Result<ProjectStats> {
        self.send(self.request(Method::GET, &format!("projects/{}/stats", id)))
            .await
    }

    // ------------------------------------------------------------------
    // investments
    // ------------------------------------------------------------------

    pub async fn list_investments(
        &self,
        project_id: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Investment>> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(project) = project_id {
            query.push(("project_id", project.to_string()));
        }
        self.send(self.request(Method::GET, "investments").query(&query))
            .await
    }

    pub async fn get_investment(&self, id: &str) -> Result<Investment> {
        self.send(self.request(Method::GET, &format!("investments/{}", id)))
            .await
    }

    // ------------------------------------------------------------------
    // analytics
    // ------------------------------------------------------------------

    pub async fn platform_analytics(&self) -> Result<PlatformAnalytics> {
        self.send(self.request(Method::GET, "analytics/platform"))
            .await
    }

    pub async fn project_analytics(&self, id: &str, period: &str) -> Result<ProjectAnalytics> {
        self.send(
            self.request(Method::GET, &format!("analytics/projects/{}", id))
                .query(&[("period", period)]),
        )
        .await
    }

    // ------------------------------------------------------------------
    // webhooks
    // ------------------------------------------------------------------

    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        self.send(self.request(Method::GET, "webhooks")).await
    }

    pub async fn register_webhook(&self, req: &RegisterWebhookRequest) -> Result<Webhook> {
        self.send(self.request(Method::POST, "webhooks").json(req))
            .await
    }

    pub async fn delete_webhook(&self, id: &str) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("webhooks/{}", id)))
            .await
    }

    pub async fn test_webhook(&self, id: &str) -> Result<()> {
        self.send_unit(self.request(Method::POST, &format!("webhooks/{}/test", id)))
            .await
    }
}

/// Pull a human-readable message out of an error response body.
/// The platform returns `{"error": "..."}` or `{"message": "..."}`.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for field in ["error", "message"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_passthrough() {
        let params = ListParams {
            status: Some("active".to_string()),
            page: 2,
            limit: 5,
            sort_by: None,
            sort_order: Some("desc".to_string()),
        };
        let query = params.to_query();
        assert!(query.contains(&("page", "2".to_string())));
        assert!(query.contains(&("limit", "5".to_string())));
        assert!(query.contains(&("status", "active".to_string())));
        assert!(query.contains(&("sort_order", "desc".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "sort_by"));
    }

    #[test]
    fn test_list_params_defaults_omit_filters() {
        let params = ListParams {
            status: None,
            page: 1,
            limit: 10,
            sort_by: None,
            sort_order: None,
        };
        assert_eq!(params.to_query().len(), 2);
    }

    #[test]
    fn test_auth_scheme_selection() {
        let client = ApiClient::new(
            "https://api-testnet.xrpl.sale/v1",
            AuthScheme::ApiKey("k".to_string()),
        );
        assert_eq!(client.base_url(), "https://api-testnet.xrpl.sale/v1");
        assert!(matches!(client.auth, AuthScheme::ApiKey(_)));
    }
}
