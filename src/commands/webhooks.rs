//! Webhooks commands - register and manage event deliveries

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::context::Ctx;
use crate::error::CliError;
use crate::models::RegisterWebhookRequest;
use crate::output::{self, spinner, truncate_id};

/// `webhooks list`
pub async fn list(ctx: &Ctx) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Fetching webhooks...");
    let webhooks = ctx.client.list_webhooks().await;
    pb.finish_and_clear();
    let webhooks = webhooks?;

    if ctx.json {
        return output::emit_json(&webhooks);
    }

    if webhooks.is_empty() {
        println!("{}", "📭 No webhooks registered".yellow());
        println!(
            "{}",
            "💡 Use \"xrplsale webhooks register --url <url>\" to add one".bright_black()
        );
        return Ok(());
    }

    println!(
        "  {:<15} {:<40} {:<10} {}",
        "ID".bright_black(),
        "URL".bright_black(),
        "Active".bright_black(),
        "Events".bright_black()
    );
    println!("  {}", output::rule(90));

    for webhook in &webhooks {
        let active = if webhook.active {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        println!(
            "  {:<15} {:<40} {:<10} {}",
            truncate_id(&webhook.id, 15).cyan(),
            truncate_id(&webhook.url, 40),
            active,
            webhook.events.join(", ")
        );
    }

    Ok(())
}

/// `webhooks register --url <url> [--events a,b,c]`
pub async fn register(ctx: &Ctx, url: String, events: String) -> Result<()> {
    ctx.require_auth()?;

    validate_url(&url)?;
    let events = parse_events(&events)?;

    let request = RegisterWebhookRequest { url, events };

    let pb = spinner("Registering webhook...");
    let webhook = ctx.client.register_webhook(&request).await;
    pb.finish_and_clear();
    let webhook = webhook?;

    if ctx.json {
        return output::emit_json(&webhook);
    }

    println!("{}", "✅ Webhook registered".green().bold());
    println!("{} {}", "ID:".bold(), webhook.id);
    println!("{} {}", "URL:".bold(), webhook.url);
    println!("{} {}", "Events:".bold(), webhook.events.join(", "));

    Ok(())
}

/// `webhooks delete <id>`
pub async fn delete(ctx: &Ctx, webhook_id: &str, yes: bool) -> Result<()> {
    ctx.require_auth()?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete webhook {}?", webhook_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "❌ Deletion cancelled".yellow());
            return Ok(());
        }
    }

    let pb = spinner("Deleting webhook...");
    let result = ctx.client.delete_webhook(webhook_id).await;
    pb.finish_and_clear();
    result?;

    println!("{}", "✅ Webhook deleted".green());
    Ok(())
}

/// `webhooks test <id>` - ask the platform to fire a test delivery
pub async fn test(ctx: &Ctx, webhook_id: &str) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Sending test delivery...");
    let result = ctx.client.test_webhook(webhook_id).await;
    pb.finish_and_clear();
    result?;

    println!("{}", "✅ Test delivery sent".green());
    println!(
        "{}",
        "💡 Check your endpoint's logs for the received payload".bright_black()
    );
    Ok(())
}

fn validate_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::Validation(format!("{} is not a valid http(s) URL", url)).into())
    }
}

fn parse_events(events: &str) -> Result<Vec<String>> {
    let parsed: Vec<String> = events
        .split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect();
    if parsed.is_empty() {
        return Err(CliError::Validation("At least one event is required".to_string()).into());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/hook").is_ok());
        assert!(validate_url("http://localhost:8080/hook").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events("investment.created, project.launched").unwrap();
        assert_eq!(events, vec!["investment.created", "project.launched"]);
        assert!(parse_events("  ,  ").is_err());
    }
}
