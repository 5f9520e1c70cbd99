use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sidenav_sidebar::PageSession;
use sidenav_tui::TuiOptions;
use tracing_subscriber::EnvFilter;

mod replay;

#[derive(Debug, Parser)]
#[command(name = "sidenav", version, about = "Drive a collapsible navigation sidebar from the terminal")]
struct Cli {
    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a script of page events and print every requested snapshot as JSON.
    Replay {
        /// Page fixture (JSON or YAML).
        #[arg(long)]
        page: PathBuf,
        /// Script of steps (JSON or YAML). Without one, prints the initial state.
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Interactive terminal front end.
    Tui {
        /// Page fixture (JSON or YAML).
        #[arg(long)]
        page: PathBuf,
        /// Page pixels per terminal column.
        #[arg(long, default_value_t = 8)]
        px_per_column: u32,
        /// Page pixels per terminal row.
        #[arg(long, default_value_t = 16)]
        px_per_row: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Command::Tui { .. });
    init_tracing(cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Command::Replay { page, script } => run_replay(&page, script.as_deref()).await,
        Command::Tui {
            page,
            px_per_column,
            px_per_row,
        } => {
            let session = load_session(&page)?;
            sidenav_tui::run(session, TuiOptions { px_per_column, px_per_row }).await
        }
    }
}

/// Logs go to `log_file` when given. Otherwise they go to stderr, except in
/// the TUI where they would corrupt the screen and are dropped.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None if interactive => {
            let _ = builder.with_writer(std::io::sink).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}

fn load_session(page: &Path) -> Result<PageSession> {
    PageSession::load(page).with_context(|| format!("failed to load page {}", page.display()))
}

async fn run_replay(page: &Path, script: Option<&Path>) -> Result<()> {
    let steps = match script {
        Some(path) => replay::load_script(path)?,
        None => vec![replay::Step::Snapshot],
    };
    let mut session = load_session(page)?;
    for snapshot in replay::replay(&mut session, &steps).await? {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    session.teardown();
    Ok(())
}
