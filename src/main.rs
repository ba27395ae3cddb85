//! ShortcutPaste host process.
//!
//! Reads JSON-lines host events on stdin and writes replies and
//! notifications on stdout. Logs go to stderr and the rolling log files.

use sp_host::bootstrap::config::resolve_config_path;
use sp_host::bootstrap::tracing::{init_tracing_subscriber, ConsoleTarget};
use sp_host::{load_or_default, run_host};
use sp_platform::DataDirResolver;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info};

fn main() {
    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();

    let dirs = DataDirResolver::new();
    let log_dir = dirs.log_dir();
    if let Err(e) = init_tracing_subscriber(log_dir.as_deref(), ConsoleTarget::Stderr) {
        eprintln!("Failed to initialize tracing: {e:#}");
    }

    if let Err(e) = run(&dirs) {
        error!(error = %format!("{e:#}"), "shortcut-paste host failed");
        std::process::exit(1);
    }
}

fn run(dirs: &DataDirResolver) -> anyhow::Result<()> {
    let config_path = resolve_config_path();
    let mut config = load_or_default(config_path.as_deref())?;
    if let Some(data_dir) = dirs.data_dir() {
        config = config.default_data_dir(&data_dir);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("shortcut-paste")
        .build()?;

    info!(version = env!("CARGO_PKG_VERSION"), "shortcut-paste host starting");
    runtime.block_on(run_host(config, BufReader::new(stdin()), stdout()))?;
    info!("stdin closed, shutting down");
    Ok(())
}
