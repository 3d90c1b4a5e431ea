//! Demo driver for the Seawatch incident tracker.
//!
//! Plays the part of the dashboard front end without a UI: it builds a
//! tracker from configuration, seeds the prototype events, replays a
//! simulated sighting feed, and prints the rendered page as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$SEAWATCH_CONFIG` or `seawatch-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the event store and view model
//! 4. Seed the prototype events
//! 5. Replay simulated sightings through the threat policy
//! 6. Select the first event, log the map overlays, and print the page

mod error;
mod seed;
mod sighting;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use seawatch_core::{EventStore, LogFormat, TrackerConfig, ViewModel};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::DemoError;

/// Config file used when `SEAWATCH_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "seawatch-config.yaml";

/// Application entry point for the demo.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a tracker operation
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!("seawatch-demo starting");
    match source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        id_prefix = config.store.id_prefix,
        alert_threshold = config.threat.alert_threshold,
        alert_delay_minutes = config.threat.alert_delay_minutes,
        sighting_seed = config.sightings.seed,
        sighting_count = config.sightings.count,
        "Tracker configured"
    );

    // 3. Build the tracker.
    let mut vm = ViewModel::new(EventStore::from_config(&config));

    // 4. Seed prototype events.
    let seeded = seed::seed_prototype_events(&mut vm)?;

    // 5. Replay the simulated feed.
    let mut rng = SmallRng::seed_from_u64(config.sightings.seed);
    let feed = sighting::generate_sightings(&mut rng, config.sightings.count);
    let report = sighting::ingest(&mut vm, &feed)?;
    info!(
        sightings = feed.len(),
        alerts = report.raised.len(),
        rescored = report.rescored.len(),
        "Sighting feed replayed"
    );

    // 6. Render.
    if let Some(first) = seeded.first() {
        vm.select_event(first)?;
    }
    for overlay in vm.render_map() {
        debug!(
            event_id = %overlay.id,
            center = %overlay.center,
            color = overlay.color.hex(),
            "map overlay"
        );
    }
    let page = serde_json::to_string_pretty(&vm.render_page());
    let page = page.map_err(DemoError::from)?;
    println!("{page}");

    info!(events = vm.store().len(), "seawatch-demo finished");
    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &TrackerConfig) {
    let level = &config.logging.level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Load configuration, falling back to defaults if the file is absent.
///
/// Returns the config together with the path it was read from.
fn load_config() -> Result<(TrackerConfig, Option<PathBuf>), DemoError> {
    let path = std::env::var_os("SEAWATCH_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = TrackerConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = TrackerConfig::default();
        config.logging.apply_env_overrides();
        Ok((config, None))
    }
}
