//! Analytics commands - platform summary and per-project series

use anyhow::Result;
use colored::Colorize;

use crate::context::Ctx;
use crate::output::{self, format_number, format_xrp, spinner};

/// `analytics platform`
pub async fn platform(ctx: &Ctx) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Fetching platform analytics...");
    let analytics = ctx.client.platform_analytics().await;
    pb.finish_and_clear();
    let analytics = analytics?;

    if ctx.json {
        return output::emit_json(&analytics);
    }

    println!();
    println!("{}", "📊 Platform Analytics".cyan().bold());
    println!("{}", output::rule(40));
    println!(
        "{} {}",
        "Total Projects:".bold(),
        format_number(&analytics.total_projects.to_string())
    );
    println!(
        "{} {}",
        "Active Projects:".bold(),
        format_number(&analytics.active_projects.to_string())
    );
    println!(
        "{} {}",
        "Total Raised:".bold(),
        format_xrp(&analytics.total_raised_xrp)
    );
    println!(
        "{} {}",
        "Total Investors:".bold(),
        format_number(&analytics.total_investors.to_string())
    );
    if let Some(volume) = &analytics.volume_24h_xrp {
        println!("{} {}", "24h Volume:".bold(), format_xrp(volume));
    }

    Ok(())
}

/// `analytics project <id> [--period <p>]`
pub async fn project(ctx: &Ctx, project_id: &str, period: &str) -> Result<()> {
    ctx.require_auth()?;

    let pb = spinner("Fetching project analytics...");
    let analytics = ctx.client.project_analytics(project_id, period).await;
    pb.finish_and_clear();
    let analytics = analytics?;

    if ctx.json {
        return output::emit_json(&analytics);
    }

    println!();
    println!(
        "{}",
        format!("📊 Project Analytics ({})", analytics.period).cyan().bold()
    );
    println!("{}", output::rule(40));
    println!("{} {}", "Project:".bold(), analytics.project_id);
    println!("{} {}", "Raised:".bold(), format_xrp(&analytics.raised_xrp));
    println!(
        "{} {}",
        "New Investors:".bold(),
        format_number(&analytics.new_investors.to_string())
    );

    if !analytics.daily.is_empty() {
        println!();
        println!(
            "  {:<12} {:<16} {}",
            "Date".bright_black(),
            "Volume".bright_black(),
            "Investments".bright_black()
        );
        println!("  {}", output::rule(40));
        for day in &analytics.daily {
            println!(
                "  {:<12} {:<16} {}",
                day.date,
                format_xrp(&day.volume_xrp),
                day.investments
            );
        }
    }

    Ok(())
}
