//! Projects commands - list, get, create, launch, stats

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::api::ListParams;
use crate::context::Ctx;
use crate::error::CliError;
use crate::models::{CreateProjectRequest, Project, Tier};
use crate::output::{self, format_number, format_xrp, spinner, status_badge, truncate_id};

/// `projects list` - paginated project table
pub async fn list(
    ctx: &Ctx,
    status: Option<String>,
    page: u32,
    limit: u32,
    sort_by: Option<String>,
    sort_order: Option<String>,
) -> Result<()> {
    ctx.require_auth()?;

    let params = ListParams {
        status,
        page,
        limit,
        sort_by,
        sort_order,
    };

    let pb = spinner("Fetching projects...");
    let response = ctx.client.list_projects(&params).await;
    pb.finish_and_clear();
    let response = response?;

    if ctx.json {
        return output::emit_json(&response);
    }

    if response.data.is_empty() {
        println!("{}", "📭 No projects found".yellow());
        return Ok(());
    }

    println!(
        "  {:<15} {:<25} {:<14} {:<8} {:<16} {}",
        "ID".bright_black(),
        "Name".bright_black(),
        "Status".bright_black(),
        "Token".bright_black(),
        "Raised".bright_black(),
        "Created".bright_black()
    );
    println!("  {}", output::rule(90));

    for project in &response.data {
        println!("{}", project_row(project));
    }

    if let Some(pagination) = &response.pagination {
        println!();
        println!(
            "{}",
            format!(
                "Page {} of {} ({} total projects)",
                pagination.page, pagination.total_pages, pagination.total
            )
            .bright_black()
        );
    }

    Ok(())
}

fn project_row(project: &Project) -> String {
    format!(
        "  {:<15} {:<25} {:<14} {:<8} {:<16} {}",
        truncate_id(&project.id, 15).cyan(),
        truncate_id(&project.name, 25),
        status_badge(&project.status),
        project.token_symbol,
        format_xrp(project.total_raised_xrp.as_deref().unwrap_or("0")),
        project.created_at.format("%b %d, %Y")
    )
}

/// `projects get <id>` - detail block
pub async fn get(ctx: &Ctx, project_id: &str) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner(&format!("Fetching project {}...", project_id));
    let project = ctx.client.get_project(project_id).await;
    pb.finish_and_clear();
    let project = project?;

    if ctx.json {
        return output::emit_json(&project);
    }

    println!();
    println!("{}", format!("🚀 {}", project.name).cyan().bold());
    println!("{}", output::rule(50));
    println!("{} {}", "ID:".bold(), project.id);
    println!("{} {}", "Status:".bold(), status_badge(&project.status));
    println!("{} {}", "Token Symbol:".bold(), project.token_symbol);
    println!("{} {}", "Total Supply:".bold(), format_number(&project.total_supply));
    println!(
        "{} {}",
        "Total Raised:".bold(),
        format_xrp(project.total_raised_xrp.as_deref().unwrap_or("0"))
    );
    println!(
        "{} {}",
        "Created:".bold(),
        project.created_at.format("%B %d, %Y at %H:%M")
    );

    if let Some(description) = &project.description {
        println!();
        println!("{}", "Description:".bold());
        println!("{}", description);
    }

    if let Some(tiers) = &project.tiers {
        if !tiers.is_empty() {
            println!();
            println!("{}", "Tiers:".bold());
            for (index, tier) in tiers.iter().enumerate() {
                println!(
                    "  {}. Tier {}: {} tokens at {} XRP each",
                    index + 1,
                    tier.tier,
                    format_number(&tier.total_tokens.to_string()),
                    tier.price_per_token
                );
            }
        }
    }

    Ok(())
}

/// Flags accepted by `projects create`
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub token_symbol: Option<String>,
    pub total_supply: Option<String>,
}

/// `projects create` - direct flags or a guided interactive sequence.
/// Presence of `--name` selects non-interactive mode.
pub async fn create(ctx: &Ctx, args: CreateArgs) -> Result<()> {
    ctx.require_auth()?;

    let payload = if args.name.is_some() {
        build_payload(args)?
    } else {
        prompt_payload()?
    };

    let pb = spinner("Creating project...");
    let project = ctx.client.create_project(&payload).await;
    pb.finish_and_clear();
    let project = project?;

    if ctx.json {
        return output::emit_json(&project);
    }

    println!();
    println!("{}", "✅ Project created successfully!".green().bold());
    println!("{} {}", "Project ID:".bold(), project.id);
    println!("{} {}", "Name:".bold(), project.name);
    println!("{} {}", "Status:".bold(), status_badge(&project.status));

    println!();
    println!("{}", "💡 Next steps:".bright_black());
    println!(
        "{}",
        format!("   • Launch project: xrplsale projects launch {}", project.id).bright_black()
    );
    println!(
        "{}",
        format!("   • Track progress: xrplsale projects stats {}", project.id).bright_black()
    );

    Ok(())
}

/// Validate flag input and assemble the creation payload. Pure; the
/// interactive path collects the same fields through prompts.
pub fn build_payload(args: CreateArgs) -> Result<CreateProjectRequest> {
    let name = args
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CliError::Validation("Project name is required".to_string()))?;
    let description = args
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| CliError::Validation("Description is required".to_string()))?;
    let token_symbol = args
        .token_symbol
        .ok_or_else(|| CliError::Validation("Token symbol is required".to_string()))?;
    validate_symbol(&token_symbol)?;
    let total_supply = args
        .total_supply
        .ok_or_else(|| CliError::Validation("Total supply is required".to_string()))?;
    validate_positive_number(&total_supply, "Total supply")?;

    Ok(CreateProjectRequest {
        name,
        description,
        token_symbol,
        total_supply,
        tiers: None,
    })
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(CliError::Validation("Token symbol is required".to_string()).into());
    }
    if symbol.len() > 10 {
        return Err(
            CliError::Validation("Token symbol must be 10 characters or less".to_string()).into(),
        );
    }
    Ok(())
}

fn validate_positive_number(value: &str, label: &str) -> Result<()> {
    match value.parse::<f64>() {
        Ok(n) if n > 0.0 => Ok(()),
        _ => Err(CliError::Validation(format!("{} must be a valid positive number", label)).into()),
    }
}

/// Guided interactive payload builder, including the open-ended tier loop
fn prompt_payload() -> Result<CreateProjectRequest> {
    println!();
    println!("{}", "🚀 Create New Project".cyan().bold());
    println!();

    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Project name")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Project name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("Project description")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Description is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let token_symbol: String = Input::with_theme(&theme)
        .with_prompt("Token symbol")
        .validate_with(|input: &String| {
            if input.is_empty() {
                Err("Token symbol is required")
            } else if input.len() > 10 {
                Err("Token symbol must be 10 characters or less")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let total_supply: String = Input::with_theme(&theme)
        .with_prompt("Total token supply")
        .validate_with(|input: &String| match input.parse::<f64>() {
            Ok(n) if n > 0.0 => Ok(()),
            _ => Err("Must be a valid positive number"),
        })
        .interact_text()?;

    let mut tiers: Vec<Tier> = Vec::new();
    let add_tiers = Confirm::with_theme(&theme)
        .with_prompt("Add pricing tiers now?")
        .default(true)
        .interact()?;

    if add_tiers {
        let mut tier_number: u32 = 1;
        loop {
            println!();
            println!("{}", format!("📊 Tier {}", tier_number).cyan());

            let price_per_token: f64 = Input::with_theme(&theme)
                .with_prompt("Price per token (in XRP)")
                .validate_with(|input: &f64| {
                    if *input > 0.0 {
                        Ok(())
                    } else {
                        Err("Must be a valid positive number")
                    }
                })
                .interact_text()?;

            let total_tokens: f64 = Input::with_theme(&theme)
                .with_prompt("Total tokens for this tier")
                .validate_with(|input: &f64| {
                    if *input > 0.0 {
                        Ok(())
                    } else {
                        Err("Must be a valid positive number")
                    }
                })
                .interact_text()?;

            tiers.push(Tier {
                tier: tier_number,
                price_per_token,
                total_tokens,
            });

            let add_another = Confirm::with_theme(&theme)
                .with_prompt("Add another tier?")
                .default(false)
                .interact()?;
            if !add_another {
                break;
            }
            tier_number += 1;
        }
    }

    Ok(CreateProjectRequest {
        name,
        description,
        token_symbol,
        total_supply,
        tiers: if tiers.is_empty() { None } else { Some(tiers) },
    })
}

/// `projects launch <id>` - confirmation then state transition
pub async fn launch(ctx: &Ctx, project_id: &str, yes: bool) -> Result<()> {
    ctx.require_auth()?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Are you sure you want to launch project {}?",
                project_id
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "❌ Launch cancelled".yellow());
            return Ok(());
        }
    }

    let pb = spinner("Launching project...");
    let project = ctx.client.launch_project(project_id).await;
    pb.finish_and_clear();
    let project = project?;

    if ctx.json {
        return output::emit_json(&project);
    }

    println!("{}", "🚀 Project launched successfully!".green().bold());
    println!("{} {}", "Status:".bold(), status_badge(&project.status));

    Ok(())
}

/// `projects stats <id>`
pub async fn stats(ctx: &Ctx, project_id: &str) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Fetching project statistics...");
    let stats = ctx.client.project_stats(project_id).await;
    pb.finish_and_clear();
    let stats = stats?;

    if ctx.json {
        return output::emit_json(&stats);
    }

    println!();
    println!("{}", "📊 Project Statistics".cyan().bold());
    println!("{}", output::rule(30));
    println!(
        "{} {}",
        "Total Raised:".bold(),
        format_xrp(stats.total_raised_xrp.as_deref().unwrap_or("0"))
    );
    println!(
        "{} {}",
        "Total Investors:".bold(),
        format_number(&stats.total_investors.unwrap_or(0).to_string())
    );
    println!(
        "{} {}",
        "Tokens Sold:".bold(),
        format_number(stats.tokens_sold.as_deref().unwrap_or("0"))
    );
    match stats.current_tier {
        Some(tier) => println!("{} {}", "Current Tier:".bold(), tier),
        None => println!("{} N/A", "Current Tier:".bold()),
    }
    if let Some(progress) = stats.progress {
        println!("{} {:.1}%", "Progress:".bold(), progress * 100.0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> CreateArgs {
        CreateArgs {
            name: Some("Moonshot".to_string()),
            description: Some("A token sale".to_string()),
            token_symbol: Some("MOON".to_string()),
            total_supply: Some("1000000".to_string()),
        }
    }

    #[test]
    fn test_build_payload_from_flags() {
        let payload = build_payload(full_args()).unwrap();
        assert_eq!(payload.name, "Moonshot");
        assert_eq!(payload.token_symbol, "MOON");
        assert_eq!(payload.total_supply, "1000000");
        assert!(payload.tiers.is_none());
    }

    #[test]
    fn test_build_payload_rejects_long_symbol() {
        let mut args = full_args();
        args.token_symbol = Some("TOOLONGSYMBOL".to_string());
        assert!(build_payload(args).is_err());
    }

    #[test]
    fn test_build_payload_rejects_bad_supply() {
        let mut args = full_args();
        args.total_supply = Some("-5".to_string());
        assert!(build_payload(args).is_err());

        let mut args = full_args();
        args.total_supply = Some("plenty".to_string());
        assert!(build_payload(args).is_err());
    }

    #[test]
    fn test_build_payload_requires_description() {
        let mut args = full_args();
        args.description = Some("   ".to_string());
        assert!(build_payload(args).is_err());
    }

    #[test]
    fn test_project_row_contains_badge_and_name() {
        colored::control::set_override(false);
        let project = Project {
            id: "proj_1234567890abcdef".to_string(),
            name: "Example".to_string(),
            status: crate::models::ProjectStatus::Active,
            token_symbol: "EXM".to_string(),
            total_supply: "1000".to_string(),
            total_raised_xrp: Some("42".to_string()),
            created_at: chrono::Utc::now(),
            description: None,
            tiers: None,
        };
        let row = project_row(&project);
        assert!(row.contains("🟢 Active"));
        assert!(row.contains("Example"));
        assert!(row.contains("42 XRP"));
        colored::control::unset_override();
    }
}
