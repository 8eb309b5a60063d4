use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod config;
mod executor;
mod frontmatter;
mod plan;
mod runner;
mod target;

use config::Config;
use plan::Roots;

#[derive(Parser)]
#[command(name = "bx-skills", version)]
#[command(
    about = "Install AI coding assistant skills to Claude Code, Codex, Kilo Code, and Windsurf",
    long_about = None
)]
struct Cli {
    /// Path to config file (defaults to ./bx-skills.toml or ~/.config/bx-skills/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Skill catalog directory (defaults to the configured or data-dir catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install or update skills from the catalog
    Install {
        /// Skill directory names
        skills: Vec<String>,

        /// Install/update all catalog skills
        #[arg(long)]
        all: bool,

        /// Target CLI(s): a slug, "all", or "auto". Repeatable
        #[arg(short = 't', long = "target")]
        targets: Vec<String>,

        /// Installation scope: user, project, or both
        #[arg(short, long)]
        scope: Option<String>,

        /// Suppress non-error output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Remove installed skills
    Uninstall {
        /// Skill directory names
        skills: Vec<String>,

        /// Uninstall all installed skills
        #[arg(long)]
        all: bool,

        /// Target CLI(s): a slug, "all", or "auto". Repeatable
        #[arg(short = 't', long = "target")]
        targets: Vec<String>,

        /// Uninstall scope: user, project, or both
        #[arg(short, long)]
        scope: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Suppress non-error output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List all available skills in the catalog
    List {
        /// One name per line (machine-readable)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show installation status of skills across targets and scopes
    Status {
        /// Target CLI(s): a slug, "all", or "auto". Repeatable
        #[arg(short = 't', long = "target")]
        targets: Vec<String>,

        /// Scope to check: user, project, or both (default: both)
        #[arg(short, long)]
        scope: Option<String>,

        /// Machine-readable output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show version, catalog location, and detected CLIs
    Info,

    /// Launch the interactive installer
    Interactive,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the quiet default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load_with_path(args.config)?;
    let catalog_dir = args
        .catalog
        .or_else(|| config.catalog_dir.clone())
        .unwrap_or_else(config::default_catalog_dir);
    let roots = Roots::from_env()?;

    match command {
        Commands::Install {
            skills,
            all,
            targets,
            scope,
            quiet,
        } => cli::install::run(
            &catalog_dir,
            &roots,
            &config.defaults,
            &skills,
            all,
            &targets,
            scope.as_deref(),
            quiet,
        ),
        Commands::Uninstall {
            skills,
            all,
            targets,
            scope,
            yes,
            quiet,
        } => cli::uninstall::run(
            &catalog_dir,
            &roots,
            &config.defaults,
            &skills,
            all,
            &targets,
            scope.as_deref(),
            yes,
            quiet,
        ),
        Commands::List { quiet } => cli::list::run(&catalog_dir, quiet),
        Commands::Status {
            targets,
            scope,
            quiet,
        } => cli::status::run(
            &catalog_dir,
            &roots,
            &config.defaults,
            &targets,
            scope.as_deref(),
            quiet,
        ),
        Commands::Info => cli::info::run(&catalog_dir, &roots),
        Commands::Interactive => cli::interactive::run(&catalog_dir, &roots).await,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bx-skills", &mut io::stdout());
            Ok(())
        }
    }
}
