//! Data models for the XRPL.Sale CLI
//!
//! All wire types use camelCase field names to match the platform API.
//! Monetary amounts travel as decimal strings; the API never rounds them
//! and neither do we.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project lifecycle status. Statuses the server introduces later are
/// carried through as-is instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Upcoming,
    Active,
    Paused,
    Completed,
    Cancelled,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Upcoming => "upcoming",
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "upcoming" => ProjectStatus::Upcoming,
            "active" => ProjectStatus::Active,
            "paused" => ProjectStatus::Paused,
            "completed" => ProjectStatus::Completed,
            "cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Other(value),
        })
    }
}

/// Pricing bracket within a token sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub tier: u32,
    pub price_per_token: f64,
    pub total_tokens: f64,
}

/// Token sale project (server-owned, always fetched fresh)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub token_symbol: String,
    pub total_supply: String,
    #[serde(default)]
    pub total_raised_xrp: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tiers: Option<Vec<Tier>>,
}

/// Payload for `projects create`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub token_symbol: String,
    pub total_supply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
}

/// Aggregated sale statistics for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    #[serde(default)]
    pub total_raised_xrp: Option<String>,
    #[serde(default)]
    pub total_investors: Option<u64>,
    #[serde(default)]
    pub tokens_sold: Option<String>,
    #[serde(default)]
    pub current_tier: Option<u32>,
    /// Fraction of the sale completed, 0.0..=1.0
    #[serde(default)]
    pub progress: Option<f64>,
}

/// List envelope returned by paginated endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

/// Server-issued challenge the wallet must sign. Ephemeral; the timestamp
/// must be echoed back verbatim on the authenticate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge: String,
    pub timestamp: i64,
}

/// Signed-challenge login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub wallet_address: String,
    pub signature: String,
    pub timestamp: i64,
}

/// Session token returned on successful wallet authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Current user, as reported by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub token_balance: Option<String>,
}

/// API key record. The full `key` is only present in the creation
/// response; list responses carry the prefix alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    pub key_prefix: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Local authentication state summary (for `auth status --json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    pub auth_method: Option<String>,
    pub wallet_address: Option<String>,
}

/// Investment in a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub project_id: String,
    pub investor_address: String,
    pub amount_xrp: String,
    pub token_amount: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Platform-wide analytics summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    pub total_projects: u64,
    pub active_projects: u64,
    pub total_raised_xrp: String,
    pub total_investors: u64,
    #[serde(default)]
    pub volume_24h_xrp: Option<String>,
}

/// Per-project analytics over a period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalytics {
    pub project_id: String,
    pub period: String,
    pub raised_xrp: String,
    pub new_investors: u64,
    #[serde(default)]
    pub daily: Vec<DailyVolume>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyVolume {
    pub date: String,
    pub volume_xrp: String,
    pub investments: u64,
}

/// Registered webhook endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_roundtrip() {
        let json = serde_json::to_string(&ProjectStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let back: ProjectStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, ProjectStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_passes_through() {
        let status: ProjectStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(status, ProjectStatus::Other("draft".to_string()));
        // JSON mode re-emits the value exactly as received
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"draft\"");
    }

    #[test]
    fn test_project_deserializes_camel_case() {
        let json = r#"{
            "id": "proj_abc123",
            "name": "Example Sale",
            "status": "upcoming",
            "tokenSymbol": "EXM",
            "totalSupply": "1000000",
            "totalRaisedXrp": "250.5",
            "createdAt": "2025-01-05T12:00:00Z",
            "tiers": [{"tier": 1, "pricePerToken": 0.1, "totalTokens": 50000}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.token_symbol, "EXM");
        assert_eq!(project.status, ProjectStatus::Upcoming);
        assert_eq!(project.tiers.unwrap()[0].tier, 1);
        assert!(project.description.is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let json = r#"{
            "data": [],
            "pagination": {"page": 2, "totalPages": 5, "total": 42}
        }"#;
        let page: Paginated<Project> = serde_json::from_str(json).unwrap();
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total, 42);
    }

    #[test]
    fn test_create_request_skips_missing_tiers() {
        let req = CreateProjectRequest {
            name: "X".to_string(),
            description: "Y".to_string(),
            token_symbol: "XYZ".to_string(),
            total_supply: "100".to_string(),
            tiers: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("tiers"));
        assert!(json.contains("tokenSymbol"));
    }
}
