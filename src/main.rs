use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use upstream_updater::config::{self, CheckFile};
use upstream_updater::{Updater, Upstream};

#[derive(Parser)]
#[command(name = "upstream-updater")]
#[command(version, about = "Checks release sources for newer versions")]
struct Cli {
    /// Write logs to a file instead of stderr (default location when PATH is omitted)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every upstream once and print the result
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Keep checking on the configured period until interrupted
    Watch {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = match cli.log_file {
        Some(Some(path)) => Some(path),
        Some(None) => Some(config::log_path()),
        None => None,
    };
    let _guard = upstream_updater::logging::init(cli.json_logs, log_file.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Check { config } => runtime.block_on(check(&config)),
        Command::Watch { config } => runtime.block_on(watch(&config)),
    }
}

fn load(path: &Path) -> anyhow::Result<(CheckFile, Vec<Arc<dyn Upstream>>)> {
    let file = CheckFile::load(path)?;
    let upstreams = file.upstreams.iter().map(|u| u.build()).collect();
    Ok((file, upstreams))
}

async fn check(path: &Path) -> anyhow::Result<()> {
    let (file, upstreams) = load(path)?;
    let updater = Updater::new(file.updater)?;

    match updater
        .check_all(&file.current, &file.schema, &upstreams)
        .await?
    {
        Some(update) => println!("{} {}", update.value, update.url),
        None => println!("{} is up to date", file.current),
    }
    Ok(())
}

async fn watch(path: &Path) -> anyhow::Result<()> {
    let (file, upstreams) = load(path)?;
    let updater = Arc::new(Updater::new(file.updater)?);

    let Some(task) = updater
        .run_all(file.current, file.schema, upstreams)
        .await?
    else {
        return Ok(());
    };

    tokio::signal::ctrl_c().await?;
    info!("Interrupted, stopping update checks");
    task.shutdown().await;
    Ok(())
}
