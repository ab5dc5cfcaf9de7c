mod commands;
mod prompt;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ratiba_core::App;
use ratiba_core::config::RatibaConfig;
use ratiba_core::store::PostgrestStore;

use crate::commands::FormArgs;

#[derive(Parser)]
#[command(name = "ratiba")]
#[command(about = "Create, edit and review your schedules from the terminal")]
struct Cli {
    /// Show debug logs (RATIBA_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use the light color palette
    #[arg(long, global = true)]
    light: bool,

    /// Without a subcommand, ratiba starts an interactive session
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming schedules
    List {
        /// Show schedules that have already ended
        #[arg(long)]
        past: bool,
    },
    /// Create a schedule (prompts for anything not given)
    New {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Edit a schedule by id
    Edit {
        id: String,

        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a schedule by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show where configuration is read from
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Some(Commands::Config) = cli.command {
        return commands::config::run();
    }

    let config = RatibaConfig::load()?;
    let store = PostgrestStore::new(&config)?;
    tracing::debug!("Using table '{}'", config.table);

    let mut app = App::new(store);
    if cli.light {
        app.toggle_theme();
    }

    match cli.command {
        None => commands::interactive::run(&mut app).await,
        Some(Commands::List { past }) => {
            commands::load(&mut app).await?;
            commands::list::run(&mut app, past);
            Ok(())
        }
        Some(Commands::New { form }) => {
            commands::load(&mut app).await?;
            commands::new::run(&mut app, form).await
        }
        Some(Commands::Edit { id, form }) => {
            commands::load(&mut app).await?;
            commands::edit::run(&mut app, &id, form).await
        }
        Some(Commands::Delete { id, yes }) => {
            commands::load(&mut app).await?;
            commands::delete::run(&mut app, &id, yes).await
        }
        Some(Commands::Config) => commands::config::run(),
    }
}

/// Store failures are already reported to the user by the command that hit
/// them, so core logs only show up with --verbose or RATIBA_LOG.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn,ratiba_core=off" }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RATIBA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
