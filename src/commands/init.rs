//! Init command - guided first-run setup

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::commands::auth;
use crate::config::Environment;
use crate::context::Ctx;

pub async fn execute(ctx: &mut Ctx) -> Result<()> {
    println!("{}", "🚀 XRPL.Sale CLI Setup".cyan().bold());
    println!();

    let environments = ["production", "testnet"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which environment do you want to use?")
        .items(&environments)
        .default(0)
        .interact()?;

    let environment = if choice == 0 {
        Environment::Production
    } else {
        Environment::Testnet
    };

    ctx.environment = environment;
    ctx.store.config.environment = environment.to_string();
    ctx.store.save()?;
    ctx.refresh_client();

    println!(
        "  {} {}",
        "Environment:".bright_black(),
        environment.to_string().green()
    );
    println!("  {} {}", "API:".bright_black(), environment.base_url());
    println!();

    auth::login_menu(ctx).await?;

    println!();
    println!("{}", "Setup complete".green().bold());
    println!("{}", "💡 Try: xrplsale projects list".bright_black());

    Ok(())
}
