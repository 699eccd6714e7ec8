//! Application entry point for the gesture remote.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Resolve the access token (`SPOTIFY_ACCESS_TOKEN` wins over the file).
//! 4. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 5. Build the [`SpotifyClient`] and the [`Dispatcher`].
//! 6. Create channels (`observation`, `report`).
//! 7. Spawn the report printer.
//! 8. Start the observation reader thread on stdin or the configured file
//!    (a path given as the first argument overrides both).
//! 9. Run the [`GestureController`] until input is exhausted.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use gesture_remote::{
    config::AppConfig,
    dispatch::{DispatchSettings, Dispatcher},
    gesture::HandObservation,
    input::ObservationReader,
    pipeline::{new_shared_status, FrameReport, GestureController},
    playback::{PlaybackClient, SpotifyClient},
};

// ---------------------------------------------------------------------------
// Report printer
// ---------------------------------------------------------------------------

/// Print each report as one JSON line on stdout.
async fn print_reports(mut report_rx: mpsc::Receiver<FrameReport>, emit: bool) {
    while let Some(report) = report_rx.recv().await {
        if !emit {
            continue;
        }
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("report: serialisation failed: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input source
// ---------------------------------------------------------------------------

fn open_source(config: &AppConfig) -> anyhow::Result<Box<dyn BufRead + Send>> {
    let path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .or_else(|| config.input.path.clone());

    match path {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("cannot open input {}", path.display()))?;
            log::info!("Reading observations from {}", path.display());
            Ok(Box::new(std::io::BufReader::new(file)))
        }
        None => {
            log::info!("Reading observations from stdin");
            Ok(Box::new(std::io::BufReader::new(std::io::stdin())))
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gesture remote starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Access token
    let token = config.resolve_access_token().context(
        "no access token: set SPOTIFY_ACCESS_TOKEN or playback.access_token in settings.toml",
    )?;

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 5. Playback client + dispatcher
    let client: Arc<dyn PlaybackClient> =
        Arc::new(SpotifyClient::from_config(&config.playback, token));
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&client),
        DispatchSettings::from(&config.dispatch),
    ));

    // 6. Channels
    let capacity = config.input.channel_capacity.max(1);
    let (observation_tx, observation_rx) = mpsc::channel::<HandObservation>(capacity);
    let (report_tx, report_rx) = mpsc::channel::<FrameReport>(capacity);

    // 7. Report printer
    let printer = rt.spawn(print_reports(report_rx, config.report.emit_json));

    // 8. Observation reader
    let source = open_source(&config)?;
    let reader = ObservationReader::start(source, observation_tx);

    // 9. Controller (blocks until the reader closes the channel)
    let status = new_shared_status();
    let controller = GestureController::new(client, dispatcher, Arc::clone(&status))
        .with_reports(report_tx);

    rt.block_on(async move {
        controller.run(observation_rx).await;
        if let Err(e) = printer.await {
            log::warn!("report printer task failed: {e}");
        }
    });

    let forwarded = reader.join();

    if let Ok(st) = status.lock() {
        log::info!(
            "Done: {} lines forwarded, {} frames processed, {} commands issued (last: {})",
            forwarded,
            st.frames_processed,
            st.commands_issued,
            st.last_command
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".into()),
        );
        if let Some(err) = &st.last_error {
            log::warn!("Last playback error: {err}");
        }
    }

    Ok(())
}
