use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use smartday_core::Config;
use tracing::warn;

mod commands;
mod logging;
mod server;

#[derive(Parser)]
#[command(name = "smartday", version, about = "SmartDay day planner")]
struct Cli {
    /// Path to configuration file (default: ~/.config/smartday/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a day from a JSON request
    Plan(commands::plan::PlanArgs),
    /// Print service status and version
    Health,
    /// Serve the planner over HTTP
    Serve(commands::serve::ServeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let (config, load_error) = match Config::load_at(config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(&config.logging.level, cli.verbose);
    if let Some(e) = load_error {
        warn!(error = %e, "could not load config; falling back to default config");
    }

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args, &config),
        Commands::Health => commands::health::run(),
        Commands::Serve(args) => commands::serve::run(args, config),
        Commands::Config { action } => commands::config::run(action, config_path),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "smartday", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
