//! External properties host.
//!
//! Loads a host configuration, binds the external properties loader, drives
//! the startup lifecycle and prints the resulting property store.
//!
//! ```text
//! host.toml → HostConfig → bind_loader → Startup::start (BeforeInit → load)
//!     → print store
//!     → optional: SIGHUP = forced reload, SIGINT/SIGTERM = stop
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use external_properties::config::{bind_loader, load_config};
use external_properties::lifecycle::{shutdown, signals, Shutdown};
use external_properties::observability::init_logging;
use external_properties::properties::{system_properties, ExternalPropertiesLoader};
use external_properties::{LoadSummary, PropertyStore, Startup};

#[derive(Parser)]
#[command(name = "external-properties")]
#[command(about = "Load external .properties files into the process property store", long_about = None)]
struct Cli {
    /// Host configuration file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Print the store and load summary as JSON.
    #[arg(long)]
    json: bool,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Stay running and reload on SIGHUP until SIGINT/SIGTERM.
    #[arg(long)]
    watch_signals: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    tracing::info!(
        config = %cli.config.display(),
        files = config.loader.files.len(),
        overwrite = config.loader.overwrite,
        load_first = config.loader.load_first,
        "Configuration loaded"
    );

    let store = system_properties();
    let loader = Arc::new(ExternalPropertiesLoader::with_system_properties());

    let report = bind_loader(&config.loader, &*loader);
    if !report.rejected.is_empty() {
        tracing::warn!(rejected = ?report.rejected, "Some loader attributes were rejected");
    }

    let mut startup = Startup::new();
    startup.add_listener(loader.clone());
    startup.start();

    let summary = loader.last_summary().unwrap_or_default();
    print_store(store, &summary, cli.json)?;

    if cli.watch_signals {
        let shutdown = Shutdown::new();
        let reloader = Arc::clone(&loader);
        let json = cli.json;
        let reload_task = tokio::spawn(signals::reload_on_hangup(
            move || {
                let summary = reloader.reload(true);
                if let Err(e) = print_store(system_properties(), &summary, json) {
                    tracing::error!(error = %e, "Failed to print reloaded properties");
                }
            },
            shutdown.subscribe(),
        ));

        shutdown::wait_for_termination().await?;
        shutdown.trigger();
        reload_task.await??;
    }

    startup.stop();
    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_store(
    store: &dyn PropertyStore,
    summary: &LoadSummary,
    json: bool,
) -> Result<(), serde_json::Error> {
    let properties = store.snapshot();
    if json {
        let out = serde_json::json!({
            "summary": summary,
            "properties": properties,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (key, value) in &properties {
            println!("{key}={value}");
        }
        for skipped in &summary.skipped {
            eprintln!("skipped {} ({}): {}", skipped.slot, skipped.path, skipped.reason);
        }
    }
    Ok(())
}
