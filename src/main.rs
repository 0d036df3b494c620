use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use testweave::Framework;
use testweave::cli::CommandContext;
use testweave::cli::commands::{self, generate::GenerateOptions, init::InitOptions};

#[derive(Parser)]
#[command(name = "testweave")]
#[command(
    version,
    about = "Detect JavaScript/TypeScript test setups and scaffold tests"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Project root (defaults to the current directory)")]
    cwd: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the project and write .testweaverc.json
    Init {
        #[arg(long, help = "Overwrite an existing config (a backup is kept)")]
        force: bool,
        #[arg(long, short, help = "Accept detected values without prompting")]
        yes: bool,
        #[arg(long, env = "TESTWEAVE_FRAMEWORK", help = "Test framework: vitest, jest, mocha")]
        framework: Option<Framework>,
        #[arg(long, help = "Print the config instead of writing it")]
        dry_run: bool,
    },

    /// Print the project detection report
    Detect {
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Generate test files for source files or directories
    Generate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, short, help = "Template name, e.g. jest-unit")]
        template: Option<String>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long, help = "Overwrite existing test files (backups are kept)")]
        force: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Inspect plugins
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the configuration file in effect
    Path,
}

#[derive(Subcommand)]
enum PluginsAction {
    /// List available and configured plugins
    List,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31mfatal:\x1b[0m testweave hit an internal error");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = match &cli.command {
        // A forced init replaces the config, so a broken one must not block it
        Commands::Init { force: true, .. } => {
            CommandContext::load_or_defaults(cli.cwd, cli.quiet)?
        }
        _ => CommandContext::load(cli.cwd, cli.quiet)?,
    };
    let rt = Runtime::new()?;

    match cli.command {
        Commands::Init {
            force,
            yes,
            framework,
            dry_run,
        } => {
            rt.block_on(commands::init::run(
                &ctx,
                InitOptions {
                    force,
                    yes,
                    framework,
                    dry_run,
                },
            ))?;
        }
        Commands::Detect { format } => {
            rt.block_on(commands::detect::run(&ctx, &format))?;
        }
        Commands::Generate {
            files,
            template,
            dry_run,
            force,
        } => {
            rt.block_on(commands::generate::run(
                &ctx,
                GenerateOptions {
                    files,
                    template,
                    dry_run,
                    force,
                },
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(&ctx, &format)?,
            ConfigAction::Path => commands::config::path(&ctx)?,
        },
        Commands::Plugins { action } => match action {
            PluginsAction::List => commands::plugins::list(&ctx)?,
        },
    }

    Ok(())
}
