//! Per-invocation execution context
//!
//! Built once in `main` after argument parsing and threaded explicitly
//! into every command handler; there is no process-global state.

use anyhow::Result;

use crate::api::{ApiClient, AuthScheme};
use crate::config::{CredentialKey, Environment, Store};
use crate::error::CliError;

pub struct Ctx {
    pub store: Store,
    pub client: ApiClient,
    pub environment: Environment,
    pub json: bool,
    api_key_flag: Option<String>,
}

impl Ctx {
    /// Resolve the request credential: an explicit `--api-key` flag wins,
    /// then a stored wallet session token, then a stored API key.
    pub fn new(
        store: Store,
        environment: Environment,
        api_key_flag: Option<String>,
        json: bool,
    ) -> Self {
        let auth = resolve_auth(&store, api_key_flag.as_deref());
        let client = ApiClient::new(environment.base_url(), auth);
        Self {
            store,
            client,
            environment,
            json,
            api_key_flag,
        }
    }

    /// Rebuild the API client after credentials or environment changed
    pub fn refresh_client(&mut self) {
        let auth = resolve_auth(&self.store, self.api_key_flag.as_deref());
        self.client = ApiClient::new(self.environment.base_url(), auth);
    }

    /// Fail unless some credential is present (API key or session token)
    pub fn require_auth(&self) -> Result<()> {
        if self.api_key_flag.is_some() || self.store.is_authenticated() {
            Ok(())
        } else {
            Err(CliError::AuthRequired("Run 'xrplsale auth login' first").into())
        }
    }

    /// Fail unless a wallet session token is present. API-key management
    /// endpoints only accept wallet sessions.
    pub fn require_session(&self) -> Result<&str> {
        self.store.get(CredentialKey::AuthToken).ok_or_else(|| {
            anyhow::Error::from(CliError::AuthRequired(
                "Authenticate with a wallet first: xrplsale auth login --interactive",
            ))
        })
    }
}

fn resolve_auth(store: &Store, api_key_flag: Option<&str>) -> AuthScheme {
    if let Some(key) = api_key_flag {
        return AuthScheme::ApiKey(key.to_string());
    }
    if let Some(token) = store.get(CredentialKey::AuthToken) {
        return AuthScheme::Bearer(token.to_string());
    }
    if let Some(key) = store.get(CredentialKey::ApiKey) {
        return AuthScheme::ApiKey(key.to_string());
    }
    AuthScheme::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> Store {
        Store::ephemeral("ctx")
    }

    #[test]
    fn test_flag_key_wins_over_stored_token() {
        let mut store = empty_store();
        store.set(CredentialKey::AuthToken, "stored-token".to_string());
        let auth = resolve_auth(&store, Some("flag-key"));
        assert!(matches!(auth, AuthScheme::ApiKey(k) if k == "flag-key"));
    }

    #[test]
    fn test_stored_token_wins_over_stored_key() {
        let mut store = empty_store();
        store.set(CredentialKey::ApiKey, "stored-key".to_string());
        store.set(CredentialKey::AuthToken, "stored-token".to_string());
        let auth = resolve_auth(&store, None);
        assert!(matches!(auth, AuthScheme::Bearer(t) if t == "stored-token"));
    }

    #[test]
    fn test_no_credentials() {
        let auth = resolve_auth(&empty_store(), None);
        assert!(matches!(auth, AuthScheme::None));
    }
}
