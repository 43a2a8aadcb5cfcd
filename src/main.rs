//! XRPL.Sale CLI - Native XRPL Launchpad Platform
//!
//! A command-line client for the XRPL.Sale token-sale platform.
//! Authenticate with an API key or a wallet signature, then manage
//! projects, investments, analytics, and webhooks over the platform API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod api;
mod commands;
mod config;
mod context;
mod error;
mod models;
mod output;
mod qr;

use commands::{analytics, auth, init, investments, projects, webhooks};
use config::Environment;
use context::Ctx;

/// XRPL.Sale CLI - Native XRPL Launchpad Platform
#[derive(Parser)]
#[command(name = "xrplsale")]
#[command(version)]
#[command(about = "🚀 XRPL.Sale CLI - Native XRPL Launchpad Platform", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// XRPL.Sale API key
    #[arg(long, global = true, env = "XRPLSALE_API_KEY")]
    api_key: Option<String>,

    /// API environment (production|testnet)
    #[arg(long, global = true, value_enum)]
    environment: Option<Environment>,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 🔐 Authentication and API key management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// 🚀 Manage token sale projects
    #[command(alias = "project")]
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// 💰 View investments
    #[command(alias = "investment")]
    Investments {
        #[command(subcommand)]
        command: InvestmentCommands,
    },

    /// 📊 Platform and project analytics
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommands,
    },

    /// 🔔 Manage webhook endpoints
    Webhooks {
        #[command(subcommand)]
        command: WebhookCommands,
    },

    /// Show configuration
    Config {
        /// Show config file path only
        #[arg(long)]
        path: bool,
    },

    /// Guided first-run setup
    Init,
}

#[derive(Subcommand)]
enum AuthCommands {
    /// 🔑 Authenticate with XRPL.Sale
    Login {
        /// XRPL wallet address for wallet authentication
        #[arg(long)]
        wallet: Option<String>,

        /// Use interactive wallet authentication
        #[arg(long)]
        interactive: bool,
    },

    /// 🚪 Logout and clear stored credentials
    Logout,

    /// 👤 Show current authentication status
    #[command(alias = "whoami")]
    Status,

    /// 🔑 Generate a new API key
    #[command(name = "generate-key", alias = "gen-key")]
    GenerateKey {
        /// API key name/description
        #[arg(long)]
        name: Option<String>,
    },

    /// 📋 List your API keys
    #[command(name = "list-keys", alias = "keys")]
    ListKeys,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// 📋 List projects
    #[command(alias = "ls")]
    List {
        /// Filter by status (active, upcoming, completed)
        #[arg(short, long)]
        status: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Number of items per page
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Sort by field (name, created_at, total_raised)
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "desc")]
        sort_order: String,
    },

    /// 🔍 Get project details
    #[command(alias = "show")]
    Get {
        /// Project ID
        project_id: String,
    },

    /// ➕ Create a new project
    #[command(alias = "new")]
    Create {
        /// Project name (presence disables interactive mode)
        #[arg(long)]
        name: Option<String>,

        /// Project description
        #[arg(long)]
        description: Option<String>,

        /// Token symbol
        #[arg(long)]
        token_symbol: Option<String>,

        /// Total token supply
        #[arg(long)]
        total_supply: Option<String>,
    },

    /// 🚀 Launch a project
    Launch {
        /// Project ID
        project_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// 📊 Get project statistics
    #[command(alias = "statistics")]
    Stats {
        /// Project ID
        project_id: String,
    },
}

#[derive(Subcommand)]
enum InvestmentCommands {
    /// 📋 List investments
    #[command(alias = "ls")]
    List {
        /// Filter by project ID
        #[arg(long)]
        project: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Number of items per page
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// 🔍 Get investment details
    #[command(alias = "show")]
    Get {
        /// Investment ID
        investment_id: String,
    },
}

#[derive(Subcommand)]
enum AnalyticsCommands {
    /// 📊 Platform-wide analytics
    Platform,

    /// 📈 Per-project analytics
    Project {
        /// Project ID
        project_id: String,

        /// Period (7d, 30d, 90d, all)
        #[arg(long, default_value = "30d")]
        period: String,
    },
}

#[derive(Subcommand)]
enum WebhookCommands {
    /// 📋 List registered webhooks
    #[command(alias = "ls")]
    List,

    /// ➕ Register a webhook endpoint
    Register {
        /// Endpoint URL (http or https)
        #[arg(long)]
        url: String,

        /// Comma-separated event names
        #[arg(long, default_value = "investment.created,project.launched")]
        events: String,
    },

    /// 🗑 Delete a webhook
    Delete {
        /// Webhook ID
        webhook_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// 📨 Send a test delivery
    Test {
        /// Webhook ID
        webhook_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // A user interrupt is a clean shutdown, not a failure
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n\n{}", "👋 Goodbye!".yellow());
            std::process::exit(0);
        }
    });

    let debug = cli.debug;
    if let Err(err) = run(cli).await {
        // Ctrl-C inside a prompt arrives as an interrupted read, not SIGINT
        if is_interrupted(&err) {
            println!("\n\n{}", "👋 Goodbye!".yellow());
            std::process::exit(0);
        }
        eprintln!();
        eprintln!("{} {}", "❌".red(), err.to_string().red());
        if debug {
            for cause in err.chain().skip(1) {
                eprintln!("   {} {}", "caused by:".bright_black(), cause);
            }
        } else {
            eprintln!("{}", "💡 Run with --debug for more detail".bright_black());
        }
        std::process::exit(1);
    }
}

fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == std::io::ErrorKind::Interrupted)
            .unwrap_or(false)
    })
}

async fn run(cli: Cli) -> Result<()> {
    let store = config::Store::open(cli.config.as_deref())?;

    // Flag wins over the sticky choice persisted by `init`
    let environment = cli
        .environment
        .or_else(|| store.config.environment.parse().ok())
        .unwrap_or(Environment::Production);

    let mut ctx = Ctx::new(store, environment, cli.api_key.clone(), cli.json);

    match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { wallet, interactive } => {
                auth::login(&mut ctx, cli.api_key, wallet, interactive).await?;
            }
            AuthCommands::Logout => auth::logout(&mut ctx).await?,
            AuthCommands::Status => auth::status(&ctx).await?,
            AuthCommands::GenerateKey { name } => auth::generate_key(&ctx, name).await?,
            AuthCommands::ListKeys => auth::list_keys(&ctx).await?,
        },

        Commands::Projects { command } => match command {
            ProjectCommands::List {
                status,
                page,
                limit,
                sort_by,
                sort_order,
            } => {
                projects::list(&ctx, status, page, limit, sort_by, Some(sort_order)).await?;
            }
            ProjectCommands::Get { project_id } => projects::get(&ctx, &project_id).await?,
            ProjectCommands::Create {
                name,
                description,
                token_symbol,
                total_supply,
            } => {
                projects::create(
                    &ctx,
                    projects::CreateArgs {
                        name,
                        description,
                        token_symbol,
                        total_supply,
                    },
                )
                .await?;
            }
            ProjectCommands::Launch { project_id, yes } => {
                projects::launch(&ctx, &project_id, yes).await?;
            }
            ProjectCommands::Stats { project_id } => projects::stats(&ctx, &project_id).await?,
        },

        Commands::Investments { command } => match command {
            InvestmentCommands::List { project, page, limit } => {
                investments::list(&ctx, project, page, limit).await?;
            }
            InvestmentCommands::Get { investment_id } => {
                investments::get(&ctx, &investment_id).await?;
            }
        },

        Commands::Analytics { command } => match command {
            AnalyticsCommands::Platform => analytics::platform(&ctx).await?,
            AnalyticsCommands::Project { project_id, period } => {
                analytics::project(&ctx, &project_id, &period).await?;
            }
        },

        Commands::Webhooks { command } => match command {
            WebhookCommands::List => webhooks::list(&ctx).await?,
            WebhookCommands::Register { url, events } => {
                webhooks::register(&ctx, url, events).await?;
            }
            WebhookCommands::Delete { webhook_id, yes } => {
                webhooks::delete(&ctx, &webhook_id, yes).await?;
            }
            WebhookCommands::Test { webhook_id } => webhooks::test(&ctx, &webhook_id).await?,
        },

        Commands::Config { path } => {
            let config_path = ctx.store.path();
            if path {
                println!("{}", config_path.display());
            } else {
                println!("Config file: {}", config_path.display());
                if config_path.exists() {
                    let mut shown = ctx.store.config.clone();
                    shown.api_key = shown.api_key.map(|k| output::mask_secret(&k));
                    shown.auth_token = shown.auth_token.map(|t| output::mask_secret(&t));
                    println!();
                    println!("{}", toml::to_string_pretty(&shown)?);
                } else {
                    println!("(not created yet - run 'xrplsale init' first)");
                }
            }
        }

        Commands::Init => init::execute(&mut ctx).await?,
    }

    Ok(())
}
