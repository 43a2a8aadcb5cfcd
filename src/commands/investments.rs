//! Investments commands - list and inspect investments

use anyhow::Result;
use colored::Colorize;

use crate::context::Ctx;
use crate::output::{self, format_number, format_xrp, spinner, truncate_id, truncate_middle};

/// `investments list [--project <id>] [--page N] [--limit N]`
pub async fn list(ctx: &Ctx, project: Option<String>, page: u32, limit: u32) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Fetching investments...");
    let response = ctx
        .client
        .list_investments(project.as_deref(), page, limit)
        .await;
    pb.finish_and_clear();
    let response = response?;

    if ctx.json {
        return output::emit_json(&response);
    }

    if response.data.is_empty() {
        println!("{}", "📭 No investments found".yellow());
        return Ok(());
    }

    println!(
        "  {:<15} {:<15} {:<17} {:<14} {:<14} {:<11} {}",
        "ID".bright_black(),
        "Project".bright_black(),
        "Investor".bright_black(),
        "Amount".bright_black(),
        "Tokens".bright_black(),
        "Status".bright_black(),
        "Date".bright_black()
    );
    println!("  {}", output::rule(100));

    for investment in &response.data {
        println!(
            "  {:<15} {:<15} {:<17} {:<14} {:<14} {:<11} {}",
            truncate_id(&investment.id, 15).cyan(),
            truncate_id(&investment.project_id, 15),
            truncate_middle(&investment.investor_address, 17),
            format_xrp(&investment.amount_xrp),
            format_number(&investment.token_amount),
            investment.status,
            investment.created_at.format("%b %d, %Y")
        );
    }

    if let Some(pagination) = &response.pagination {
        println!();
        println!(
            "{}",
            format!(
                "Page {} of {} ({} total investments)",
                pagination.page, pagination.total_pages, pagination.total
            )
            .bright_black()
        );
    }

    Ok(())
}

/// `investments get <id>`
pub async fn get(ctx: &Ctx, investment_id: &str) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner(&format!("Fetching investment {}...", investment_id));
    let investment = ctx.client.get_investment(investment_id).await;
    pb.finish_and_clear();
    let investment = investment?;

    if ctx.json {
        return output::emit_json(&investment);
    }

    println!();
    println!("{}", "💰 Investment".cyan().bold());
    println!("{}", output::rule(50));
    println!("{} {}", "ID:".bold(), investment.id);
    println!("{} {}", "Project:".bold(), investment.project_id);
    println!("{} {}", "Investor:".bold(), investment.investor_address);
    println!("{} {}", "Amount:".bold(), format_xrp(&investment.amount_xrp));
    println!(
        "{} {}",
        "Tokens:".bold(),
        format_number(&investment.token_amount)
    );
    println!("{} {}", "Status:".bold(), investment.status);
    println!(
        "{} {}",
        "Date:".bold(),
        investment.created_at.format("%B %d, %Y at %H:%M")
    );

    Ok(())
}
