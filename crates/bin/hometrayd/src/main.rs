//! # hometrayd: hometray daemon
//!
//! Composition root that wires all adapters together and runs one monitor
//! per selected Home Assistant entity.
//!
//! ## Responsibilities
//! - Parse configuration (CLI arg, env vars, config file)
//! - Initialize logging
//! - Check the default icons and build the hub client (fatal on failure)
//! - Resolve the entity selection and start the monitors
//! - Run the presentation loop until the user quits, then stop every monitor
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use hometray_adapter_assets_fs::FsAssetStore;
use hometray_adapter_console::{ConsoleSurface, spawn_ctrl_c, spawn_stdin};
use hometray_adapter_hass_http::HassClient;
use hometray_app::icon_resolver::IconResolver;
use hometray_app::supervisor::MonitorSupervisor;
use hometray_app::ui::{UiHandle, UiLoop};

use config::{Config, config_path};

const EVENT_BUFFER: usize = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path(
        std::env::args().nth(1),
        std::env::var("HOMETRAY_CONFIG").ok(),
    );
    let config = Config::load(&path)?;

    // Stdout carries the tray status lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config));
    // A pending stdin read cannot be cancelled.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let selection = config.selection()?;

    let store = FsAssetStore::new(&config.assets);
    let resolver = IconResolver::new(store).inspect_err(|err| {
        tracing::error!(dir = %config.assets.dir.display(), %err, "default icons are missing");
    })?;
    let client = HassClient::new(&config.hass.connection)?;

    let (ui, commands) = UiHandle::channel();
    let (events_tx, events) = mpsc::channel(EVENT_BUFFER);
    let mut surface = ConsoleSurface::stdout();
    surface.print_help();
    spawn_stdin(events_tx.clone());
    spawn_ctrl_c(events_tx);

    tracing::info!(
        api_url = %config.hass.connection.api_url,
        interval_secs = config.polling.interval_secs,
        "hometrayd starting"
    );

    let mut supervisor = MonitorSupervisor::new(
        Arc::new(client),
        resolver,
        ui,
        config.monitor_settings(),
    );
    let started = supervisor.start_selection(&selection).await;
    if started.is_empty() {
        tracing::warn!("no entity could be monitored, waiting for exit");
    }

    UiLoop::new(surface, commands, events)
        .run(&mut supervisor)
        .await;

    tracing::info!("hometrayd stopped");
    Ok(())
}
