//! CLI entry and dispatch.

use anyhow::{Context, Result};
use botdeck_core::config::Config;
use clap::Parser;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "botdeck")]
#[command(version = "1.0")]
#[command(about = "Admin console for an RPA bot fleet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in with email and password, or with an SSO provider token
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,

        /// Account password
        #[arg(long, requires = "email")]
        password: Option<String>,

        /// Federated provider access token
        #[arg(long = "sso-token", conflicts_with_all = ["email", "password"])]
        sso_token: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Full display name
        #[arg(long)]
        full_name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Password confirmation
        #[arg(long)]
        confirm_password: String,
    },

    /// Clear the current session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Update the signed-in profile
    Profile {
        /// New full name
        #[arg(long)]
        full_name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,

        /// New avatar URL
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Inspect the bot fleet
    Bots {
        #[command(subcommand)]
        command: BotsCommands,
    },

    /// Inspect business units
    Units {
        #[command(subcommand)]
        command: UnitsCommands,
    },

    /// Inspect business processes
    Processes {
        #[command(subcommand)]
        command: ProcessesCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum BotsCommands {
    /// Lists bots with search, filters, sorting and paging
    List {
        #[command(flatten)]
        args: commands::listing::ListArgs,

        /// Filter by status (idle, running, failed, ...)
        #[arg(long)]
        status: Option<String>,

        /// Filter by technology (ui_path, blue_prism, ...)
        #[arg(long)]
        technology: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum UnitsCommands {
    /// Lists business units with search, filters, sorting and paging
    List {
        #[command(flatten)]
        args: commands::listing::ListArgs,

        /// Filter by status (active, inactive, archived)
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum ProcessesCommands {
    /// Lists processes with search, filters, sorting and paging
    List {
        #[command(flatten)]
        args: commands::listing::ListArgs,

        /// Filter by status (active, inactive, testing, ...)
        #[arg(long)]
        status: Option<String>,

        /// Filter by category (finance, hr, operations, ...)
        #[arg(long)]
        category: Option<String>,

        /// Filter by priority (critical, high, medium, low)
        #[arg(long)]
        priority: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Diagnostics go to stderr so table output stays pipeable.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    match cli.command {
        Commands::Login {
            email,
            password,
            sso_token,
        } => match (email, password, sso_token) {
            (_, _, Some(token)) => commands::auth::login_sso(&config, &token).await,
            (Some(email), Some(password), None) => {
                commands::auth::login(&config, &email, &password).await
            }
            _ => anyhow::bail!("Please pass --email and --password, or --sso-token"),
        },

        Commands::Register {
            full_name,
            email,
            password,
            confirm_password,
        } => {
            commands::auth::register(&config, full_name, email, password, confirm_password).await
        }

        Commands::Logout => commands::auth::logout(&config),
        Commands::Whoami => commands::auth::whoami(&config),

        Commands::Profile {
            full_name,
            email,
            avatar_url,
        } => commands::auth::profile(&config, full_name, email, avatar_url).await,

        Commands::Bots { command } => match command {
            BotsCommands::List {
                args,
                status,
                technology,
            } => commands::listing::bots(&config, &args, status.as_deref(), technology.as_deref())
                .await,
        },

        Commands::Units { command } => match command {
            UnitsCommands::List { args, status } => {
                commands::listing::units(&config, &args, status.as_deref()).await
            }
        },

        Commands::Processes { command } => match command {
            ProcessesCommands::List {
                args,
                status,
                category,
                priority,
            } => {
                commands::listing::processes(
                    &config,
                    &args,
                    status.as_deref(),
                    category.as_deref(),
                    priority.as_deref(),
                )
                .await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
