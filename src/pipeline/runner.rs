//! Gesture controller: drives the classify → snapshot → dispatch loop.
//!
//! [`GestureController`] receives [`HandObservation`]s over a
//! `tokio::sync::mpsc` channel and handles them one at a time.
//!
//! # Per-frame flow
//!
//! ```text
//! observation
//!   └─▶ classify                     (pure, no I/O)
//!   └─▶ client.current_playback()    (read before the dispatcher lock)
//!         ├─ Ok  → dispatcher.dispatch(label, snapshot)
//!         └─ Err → warn, no dispatch, status = Error
//!   └─▶ FrameReport → report channel (if attached)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::dispatch::Dispatcher;
use crate::gesture::{classify, HandObservation};
use crate::playback::PlaybackClient;

use super::state::{FrameReport, SharedStatus};

/// Runs the frame loop.
pub struct GestureController {
    client: Arc<dyn PlaybackClient>,
    dispatcher: Arc<Dispatcher>,
    status: SharedStatus,
    report_tx: Option<mpsc::Sender<FrameReport>>,
}

impl GestureController {
    /// * `client`: used for the per-frame snapshot read.
    /// * `dispatcher`: issues commands (normally through the same client).
    /// * `status`: running totals, readable from other tasks.
    pub fn new(
        client: Arc<dyn PlaybackClient>,
        dispatcher: Arc<Dispatcher>,
        status: SharedStatus,
    ) -> Self {
        Self {
            client,
            dispatcher,
            status,
            report_tx: None,
        }
    }

    /// Publish a [`FrameReport`] for every processed frame on `tx`.
    pub fn with_reports(mut self, tx: mpsc::Sender<FrameReport>) -> Self {
        self.report_tx = Some(tx);
        self
    }

    /// Run until `observation_rx` is closed.
    pub async fn run(self, mut observation_rx: mpsc::Receiver<HandObservation>) {
        log::info!("controller: started");

        while let Some(observation) = observation_rx.recv().await {
            let report = self.process(observation).await;

            if let Some(tx) = &self.report_tx {
                if tx.send(report).await.is_err() {
                    log::debug!("controller: report receiver closed");
                }
            }
        }

        log::info!("controller: observation channel closed, shutting down");
    }

    /// Handle one frame and return its report.
    pub async fn process(&self, observation: HandObservation) -> FrameReport {
        let label = classify(&observation);
        log::trace!("controller: classified {label}");

        let report = match self.client.current_playback().await {
            Ok(snapshot) => {
                self.set_error(None);
                let command = self.dispatcher.dispatch(label, snapshot.as_ref()).await;
                FrameReport::new(label, command, snapshot.as_ref())
            }
            Err(e) => {
                log::warn!("controller: could not read playback state: {e}");
                self.set_error(Some(e.to_string()));
                FrameReport::read_failed(label)
            }
        };

        self.record(&report);
        report
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut st) = self.status.lock() {
            st.last_error = message;
        }
    }

    fn record(&self, report: &FrameReport) {
        if let Ok(mut st) = self.status.lock() {
            st.frames_processed += 1;
            st.last_gesture = report.gesture;
            if report.command.is_some() {
                st.commands_issued += 1;
                st.last_command = report.command;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::dispatch::{Command, DispatchSettings, DispatcherState};
    use crate::gesture::classifier::tests::{hand, Thumb};
    use crate::gesture::GestureLabel;
    use crate::pipeline::state::{new_shared_status, PlaybackStatus};
    use crate::playback::{Device, MockCall, MockPlaybackClient, PlaybackSnapshot, TrackInfo};

    fn snapshot(is_playing: bool) -> PlaybackSnapshot {
        PlaybackSnapshot {
            device: Some(Device {
                id: "dev".into(),
                volume_percent: 30,
            }),
            is_playing,
            track: Some(TrackInfo {
                name: "Song".into(),
                artist: Some("Artist".into()),
            }),
        }
    }

    /// Controller whose dispatcher has no debounce, so every frame is eligible.
    fn make_controller(mock: &Arc<MockPlaybackClient>) -> (GestureController, SharedStatus) {
        let client = Arc::clone(mock) as Arc<dyn PlaybackClient>;
        let settings = DispatchSettings {
            debounce: Duration::ZERO,
            volume_step: 10,
        };
        let dispatcher = Arc::new(Dispatcher::with_state(
            Arc::clone(&client),
            settings,
            DispatcherState::new(Instant::now()),
        ));
        let status = new_shared_status();
        (
            GestureController::new(client, dispatcher, Arc::clone(&status)),
            status,
        )
    }

    fn open_hand() -> HandObservation {
        Some(hand(Thumb::Out, [true; 4]))
    }

    fn fist() -> HandObservation {
        Some(hand(Thumb::Tucked, [false; 4]))
    }

    #[tokio::test]
    async fn no_hand_frame_issues_nothing() {
        let mock = Arc::new(MockPlaybackClient::with_snapshot(snapshot(false)));
        let (controller, status) = make_controller(&mock);

        let report = controller.process(None).await;

        assert_eq!(report.gesture, GestureLabel::NoHand);
        assert_eq!(report.command, None);
        assert!(mock.calls().is_empty());
        assert_eq!(status.lock().unwrap().frames_processed, 1);
    }

    #[tokio::test]
    async fn open_hand_while_paused_plays() {
        let mock = Arc::new(MockPlaybackClient::with_snapshot(snapshot(false)));
        let (controller, status) = make_controller(&mock);

        let report = controller.process(open_hand()).await;

        assert_eq!(report.gesture, GestureLabel::OpenHandPlay);
        assert_eq!(report.command, Some(Command::Play));
        assert_eq!(report.current_track, "Song - Artist");
        assert_eq!(report.playback_status, PlaybackStatus::Paused);
        assert_eq!(report.volume, 30);
        assert_eq!(mock.calls(), vec![MockCall::Play("dev".into())]);

        let st = status.lock().unwrap();
        assert_eq!(st.commands_issued, 1);
        assert_eq!(st.last_command, Some(Command::Play));
    }

    #[tokio::test]
    async fn read_failure_skips_dispatch() {
        let mock = Arc::new(MockPlaybackClient::with_snapshot(snapshot(true)));
        mock.fail_reads(true);
        let (controller, status) = make_controller(&mock);

        let report = controller.process(fist()).await;

        assert_eq!(report.gesture, GestureLabel::ClosedFistPause);
        assert_eq!(report.playback_status, PlaybackStatus::Error);
        assert_eq!(report.current_track, "Error");
        assert!(mock.calls().is_empty());
        assert!(status.lock().unwrap().last_error.is_some());
    }

    #[tokio::test]
    async fn nothing_active_reports_idle() {
        let mock = Arc::new(MockPlaybackClient::new());
        let (controller, _status) = make_controller(&mock);

        let report = controller.process(open_hand()).await;

        assert_eq!(report.command, None);
        assert_eq!(report.current_track, "No Active Track");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn run_processes_frames_in_order() {
        let mock = Arc::new(MockPlaybackClient::with_snapshot(snapshot(true)));
        let (controller, status) = make_controller(&mock);
        let (report_tx, mut report_rx) = mpsc::channel(16);
        let controller = controller.with_reports(report_tx);

        let (tx, rx) = mpsc::channel(16);
        tx.send(fist()).await.unwrap();
        tx.send(fist()).await.unwrap();
        tx.send(None).await.unwrap();
        drop(tx);

        controller.run(rx).await;

        let mut gestures = Vec::new();
        let mut commands = Vec::new();
        while let Some(report) = report_rx.recv().await {
            gestures.push(report.gesture);
            commands.push(report.command);
        }

        assert_eq!(
            gestures,
            vec![
                GestureLabel::ClosedFistPause,
                GestureLabel::ClosedFistPause,
                GestureLabel::NoHand,
            ]
        );
        // Second fist is a held pose: suppressed.
        assert_eq!(commands, vec![Some(Command::Pause), None, None]);

        let st = status.lock().unwrap();
        assert_eq!(st.frames_processed, 3);
        assert_eq!(st.commands_issued, 1);
        assert_eq!(st.last_gesture, GestureLabel::NoHand);
    }
}
