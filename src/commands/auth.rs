//! Auth commands - login, logout, status, API key management
//!
//! Two login methods, mutually exclusive per session: API-key validation
//! and wallet-challenge-signature exchange. The interactive menu defers
//! to the same flow functions; it never re-enters the command parser.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use regex::Regex;

use crate::api::{ApiClient, AuthScheme};
use crate::config::{CredentialKey, Store};
use crate::context::Ctx;
use crate::error::CliError;
use crate::models::{AuthStatus, AuthenticateRequest};
use crate::output::{self, mask_secret, spinner};
use crate::qr;

#[derive(Debug, PartialEq, Eq)]
enum LoginMethod {
    ApiKey(String),
    Wallet(Option<String>),
    Menu,
}

/// Explicit `--wallet`/`--interactive` win over an API key, which may
/// have been picked up from `XRPLSALE_API_KEY` rather than typed.
fn choose_method(
    api_key: Option<String>,
    wallet: Option<String>,
    interactive: bool,
) -> LoginMethod {
    if wallet.is_some() || interactive {
        LoginMethod::Wallet(wallet)
    } else if let Some(key) = api_key {
        LoginMethod::ApiKey(key)
    } else {
        LoginMethod::Menu
    }
}

/// Dispatch for `auth login`
pub async fn login(
    ctx: &mut Ctx,
    api_key: Option<String>,
    wallet: Option<String>,
    interactive: bool,
) -> Result<()> {
    match choose_method(api_key, wallet, interactive) {
        LoginMethod::ApiKey(key) => login_with_api_key(ctx, key).await,
        LoginMethod::Wallet(wallet) => login_with_wallet(ctx, wallet).await,
        LoginMethod::Menu => login_menu(ctx).await,
    }
}

/// Interactive selection between the two login methods
pub async fn login_menu(ctx: &mut Ctx) -> Result<()> {
    let methods = ["🔑 API Key", "👛 XRPL Wallet"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose authentication method")
        .items(&methods)
        .default(0)
        .interact()?;

    if choice == 0 {
        let key: String = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your API key")
            .interact()?;
        if key.is_empty() {
            return Err(CliError::Validation("API key is required".to_string()).into());
        }
        login_with_api_key(ctx, key).await
    } else {
        login_with_wallet(ctx, None).await
    }
}

/// API-key flow: store the key speculatively, probe the platform, and
/// roll the write back when validation fails.
async fn login_with_api_key(ctx: &mut Ctx, key: String) -> Result<()> {
    ctx.store.set(CredentialKey::ApiKey, key.clone());
    ctx.store.save()?;

    let probe = ApiClient::new(ctx.environment.base_url(), AuthScheme::ApiKey(key));

    let pb = spinner("Validating API key...");
    let outcome = probe.validate_api_key().await;
    pb.finish_and_clear();
    settle_api_key(&mut ctx.store, outcome)?;

    ctx.refresh_client();
    println!("{}", "✅ Successfully authenticated with API key".green());

    // Best-effort identity display; the login itself already succeeded
    if let Ok(user) = probe.current_user().await {
        let identity = user
            .email
            .or(user.wallet_address)
            .unwrap_or_else(|| "unknown".to_string());
        println!("{} {}", "Logged in as:".bold(), identity);
    }

    Ok(())
}

/// Keep or roll back the speculative key write. A failed probe must
/// leave the store with no API key, on disk included.
fn settle_api_key(store: &mut Store, probe: Result<()>) -> Result<()> {
    match probe {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!("API key validation failed: {err:#}");
            store.delete(CredentialKey::ApiKey);
            store.save()?;
            Err(CliError::InvalidApiKey.into())
        }
    }
}

/// Wallet flow: challenge, external signature, authenticate
async fn login_with_wallet(ctx: &mut Ctx, wallet: Option<String>) -> Result<()> {
    let wallet_address = match wallet {
        Some(addr) => {
            if !is_valid_wallet_address(&addr) {
                return Err(CliError::Validation(format!(
                    "{} is not a valid XRPL wallet address",
                    addr
                ))
                .into());
            }
            addr
        }
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your XRPL wallet address")
            .validate_with(|input: &String| {
                if is_valid_wallet_address(input) {
                    Ok(())
                } else {
                    Err("Please enter a valid XRPL wallet address")
                }
            })
            .interact_text()?,
    };

    let anon = ApiClient::new(ctx.environment.base_url(), AuthScheme::None);

    let pb = spinner("Generating authentication challenge...");
    let challenge = anon.generate_challenge(&wallet_address).await;
    pb.finish_and_clear();
    let challenge = challenge?;

    println!();
    println!("{}", "🔐 Wallet Authentication".cyan().bold());
    println!("{}", output::rule(40));
    println!("{} {}", "Wallet Address:".bold(), wallet_address);
    println!("{} {}", "Challenge:".bold(), challenge.challenge);
    println!("{} {}", "Timestamp:".bold(), challenge.timestamp);

    println!();
    println!("{}", "📱 QR Code for mobile wallets:".cyan());
    match qr::render(&challenge.challenge) {
        Some(code) => println!("{}", code),
        None => println!("{}", "⚠️  Could not render QR code".yellow()),
    }

    println!("{}", "⚡ Please sign this challenge with your XRPL wallet".yellow());
    println!("{}", "   • Use your preferred XRPL wallet (Xaman, Crossmark, etc.)".bright_black());
    println!("{}", "   • Sign the challenge message".bright_black());
    println!("{}", "   • Enter the signature below".bright_black());
    println!();

    let signature: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the signature")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Signature is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    // The timestamp must be the exact value the challenge call returned
    let request = AuthenticateRequest {
        wallet_address: wallet_address.clone(),
        signature: signature.trim().to_string(),
        timestamp: challenge.timestamp,
    };

    let pb = spinner("Authenticating with signature...");
    let session = anon.authenticate(&request).await;
    pb.finish_and_clear();
    let session = session.context("Authentication failed. Please check your signature.")?;

    ctx.store.set(CredentialKey::AuthToken, session.token);
    ctx.store.set(CredentialKey::WalletAddress, wallet_address.clone());
    ctx.store.config.token_expires_at = Some(session.expires_at.to_rfc3339());
    ctx.store.save()?;
    ctx.refresh_client();

    println!("{}", "✅ Successfully authenticated with wallet!".green());
    println!("{} {}", "Wallet:".bold(), wallet_address);
    println!(
        "{} {}",
        "Token expires:".bold(),
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

/// `auth logout` - clear all stored credentials
pub async fn logout(ctx: &mut Ctx) -> Result<()> {
    ctx.store.delete(CredentialKey::ApiKey);
    ctx.store.delete(CredentialKey::AuthToken);
    ctx.store.delete(CredentialKey::WalletAddress);
    ctx.store.save()?;

    println!("{}", "✅ Successfully logged out".green());
    println!("{}", "💡 Use \"xrplsale auth login\" to authenticate again".bright_black());
    Ok(())
}

/// `auth status` / `auth whoami`
pub async fn status(ctx: &Ctx) -> Result<()> {
    let api_key = ctx.store.get(CredentialKey::ApiKey);
    let auth_token = ctx.store.get(CredentialKey::AuthToken);
    let wallet_address = ctx.store.get(CredentialKey::WalletAddress);

    if ctx.json {
        let method = if api_key.is_some() {
            Some("apiKey".to_string())
        } else if auth_token.is_some() {
            Some("wallet".to_string())
        } else {
            None
        };
        return output::emit_json(&AuthStatus {
            authenticated: api_key.is_some() || auth_token.is_some(),
            auth_method: method,
            wallet_address: wallet_address.map(|s| s.to_string()),
        });
    }

    if api_key.is_none() && auth_token.is_none() {
        println!("{}", "❌ Not authenticated".red());
        println!("{}", "💡 Use \"xrplsale auth login\" to authenticate".bright_black());
        return Ok(());
    }

    println!("{}", "✅ Authenticated".green());

    if let Some(key) = api_key {
        println!("{} API Key", "Method:".bold());
        println!("{} {}", "API Key:".bold(), mask_secret(key));
    }

    if let (Some(_), Some(wallet)) = (auth_token, wallet_address) {
        println!("{} XRPL Wallet", "Method:".bold());
        println!("{} {}", "Wallet:".bold(), wallet);

        if let Some(expires) = &ctx.store.config.token_expires_at {
            if let Ok(when) = DateTime::parse_from_rfc3339(expires) {
                println!(
                    "{} {}",
                    "Token expires:".bold(),
                    when.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC")
                );
            }
        }

        // Extra detail is best effort; the session may have expired
        match ctx.client.current_user().await {
            Ok(user) => {
                if let Some(tier) = user.tier {
                    println!("{} {}", "Tier:".bold(), tier);
                }
                if let Some(balance) = user.token_balance {
                    println!(
                        "{} {}",
                        "XSALE Balance:".bold(),
                        output::format_number(&balance)
                    );
                }
            }
            Err(err) => {
                tracing::debug!("Could not fetch user details: {err:#}");
                println!("{}", "⚠️  Could not fetch user details".yellow());
            }
        }
    }

    Ok(())
}

/// `auth generate-key` - create a new API key (wallet session required)
pub async fn generate_key(ctx: &Ctx, name: Option<String>) -> Result<()> {
    ctx.require_session()?;

    let key_name = name.unwrap_or_else(|| format!("CLI Key - {}", Utc::now().to_rfc3339()));

    let pb = spinner("Generating API key...");
    let record = ctx.client.generate_api_key(&key_name).await;
    pb.finish_and_clear();
    let record = record?;

    if ctx.json {
        return output::emit_json(&record);
    }

    println!("{}", "🔑 API Key Generated Successfully!".green().bold());
    println!("{}", output::rule(50));
    println!("{} {}", "Name:".bold(), record.name);
    if let Some(key) = &record.key {
        println!("{} {}", "Key:".bold(), key.cyan());
    }
    println!(
        "{} {}",
        "Created:".bold(),
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    println!();
    println!("{}", "⚠️  IMPORTANT:".yellow().bold());
    println!("{}", "   • Save this API key securely".yellow());
    println!("{}", "   • This is the only time you will see the full key".yellow());
    println!("{}", "   • Use it with: xrplsale auth login --api-key <key>".yellow());

    Ok(())
}

/// `auth list-keys` - list existing API keys (prefixes only)
pub async fn list_keys(ctx: &Ctx) -> Result<()> {
    ctx.require_session()?;

    let pb = spinner("Fetching API keys...");
    let keys = ctx.client.list_api_keys().await;
    pb.finish_and_clear();
    let keys = keys?;

    if ctx.json {
        return output::emit_json(&keys);
    }

    if keys.is_empty() {
        println!("{}", "📭 No API keys found".yellow());
        println!("{}", "💡 Use \"xrplsale auth generate-key\" to create one".bright_black());
        return Ok(());
    }

    println!();
    println!("{}", format!("🔑 Your API Keys ({})", keys.len()).cyan().bold());
    println!("{}", output::rule(50));

    for (index, key) in keys.iter().enumerate() {
        println!("{}. {}", index + 1, key.name.bold());
        println!("   {} {}{}", "Key:".bright_black(), key.key_prefix, "*".repeat(32));
        println!(
            "   {} {}",
            "Created:".bright_black(),
            key.created_at.format("%Y-%m-%d %H:%M UTC")
        );
        let last_used = key
            .last_used_at
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Never".to_string());
        println!("   {} {}", "Last Used:".bright_black(), last_used);
        println!();
    }

    Ok(())
}

/// XRPL classic addresses: `r` followed by 24-34 base58 characters
/// (no 0, O, I, or l).
pub fn is_valid_wallet_address(address: &str) -> bool {
    static WALLET_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    WALLET_RE
        .get_or_init(|| Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{24,34}$").unwrap())
        .is_match(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_wallet_addresses() {
        assert!(is_valid_wallet_address("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH"));
        assert!(is_valid_wallet_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
    }

    #[test]
    fn test_invalid_wallet_addresses() {
        assert!(!is_valid_wallet_address(""));
        assert!(!is_valid_wallet_address("xN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH"));
        assert!(!is_valid_wallet_address("rshort"));
        // 0, O, I, l are not in the XRPL base58 alphabet
        assert!(!is_valid_wallet_address("r0000000000000000000000000"));
    }

    #[test]
    fn test_wallet_flags_win_over_env_key() {
        assert_eq!(
            choose_method(Some("env-key".to_string()), Some("rWallet".to_string()), false),
            LoginMethod::Wallet(Some("rWallet".to_string()))
        );
        assert_eq!(
            choose_method(Some("env-key".to_string()), None, true),
            LoginMethod::Wallet(None)
        );
    }

    #[test]
    fn test_api_key_dispatch_without_wallet_flags() {
        assert_eq!(
            choose_method(Some("k".to_string()), None, false),
            LoginMethod::ApiKey("k".to_string())
        );
        assert_eq!(choose_method(None, None, false), LoginMethod::Menu);
    }

    #[test]
    fn test_failed_validation_rolls_back_stored_key() {
        let mut store = Store::ephemeral("rollback");
        store.set(CredentialKey::ApiKey, "xsale_bad".to_string());
        store.save().unwrap();

        let err = settle_api_key(&mut store, Err(anyhow::anyhow!("401 Unauthorized")))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidApiKey)
        ));
        assert_eq!(store.get(CredentialKey::ApiKey), None);

        // Rollback must also be persisted
        let reloaded = Store::open(Some(store.path())).unwrap();
        assert_eq!(reloaded.get(CredentialKey::ApiKey), None);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_successful_validation_keeps_stored_key() {
        let mut store = Store::ephemeral("keep-key");
        store.set(CredentialKey::ApiKey, "xsale_good".to_string());
        settle_api_key(&mut store, Ok(())).unwrap();
        assert_eq!(store.get(CredentialKey::ApiKey), Some("xsale_good"));
    }

    #[test]
    fn test_authenticate_request_echoes_challenge_timestamp() {
        let challenge = crate::models::Challenge {
            challenge: "sign-me".to_string(),
            timestamp: 1736100000,
        };
        let request = AuthenticateRequest {
            wallet_address: "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH".to_string(),
            signature: "ABCDEF".to_string(),
            timestamp: challenge.timestamp,
        };
        assert_eq!(request.timestamp, challenge.timestamp);
        assert!(!request.signature.is_empty());
    }
}
