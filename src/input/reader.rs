//! Dedicated OS-thread observation reader.
//!
//! Reading stdin (or a file) blocks, so it must not run inside a tokio task.
//! [`ObservationReader`] owns that thread and a stop flag; dropping it sets the
//! flag so the thread stops forwarding after the line it is currently reading.

use std::io::BufRead;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::mpsc;

use crate::gesture::HandObservation;

use super::parse_observation;

/// Handle to a running reader thread.
pub struct ObservationReader {
    stop: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<u64>>,
}

impl ObservationReader {
    /// Spawn a thread that parses `source` line by line and forwards every
    /// observation on `tx`.
    ///
    /// Malformed lines are logged and skipped.  The thread exits at end of
    /// input, on a read error, or when the receiving side is dropped; `tx` is
    /// dropped with it, which closes the channel.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to create the thread.
    pub fn start<R>(source: R, tx: mpsc::Sender<HandObservation>) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("observation-reader".into())
            .spawn(move || {
                let mut forwarded = 0u64;

                for (n, line) in source.lines().enumerate() {
                    if stop_clone.load(Ordering::Relaxed) {
                        break;
                    }

                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            log::error!("observation-reader: read failed: {e}");
                            break;
                        }
                    };

                    let observation = match parse_observation(&line) {
                        Ok(Some(observation)) => observation,
                        Ok(None) => continue,
                        Err(e) => {
                            log::warn!("observation-reader: line {} skipped: {e}", n + 1);
                            continue;
                        }
                    };

                    // blocking_send is safe to call from non-async threads.
                    if tx.blocking_send(observation).is_err() {
                        log::debug!("observation-reader: receiver closed");
                        break;
                    }
                    forwarded += 1;
                }

                log::info!("observation-reader: finished after {forwarded} frames");
                forwarded
            })
            .expect("failed to spawn observation-reader thread");

        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Wait for the reader to finish and return how many frames it forwarded.
    pub fn join(mut self) -> u64 {
        self.thread
            .take()
            .and_then(|t| t.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for ObservationReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn hand_line() -> String {
        let points = vec![r#"{"x":0.5,"y":0.5}"#; 21];
        format!("[{}]", points.join(","))
    }

    #[tokio::test]
    async fn forwards_valid_lines_and_skips_bad_ones() {
        let input = format!("null\n\nnot json\n{}\n[]\nnull\n", hand_line());
        let (tx, mut rx) = mpsc::channel(8);

        let reader = ObservationReader::start(Cursor::new(input), tx);

        let mut received = Vec::new();
        while let Some(obs) = rx.recv().await {
            received.push(obs.is_some());
        }

        assert_eq!(received, vec![false, true, false]);
        let forwarded = tokio::task::spawn_blocking(move || reader.join())
            .await
            .unwrap();
        assert_eq!(forwarded, 3);
    }

    #[tokio::test]
    async fn stops_when_receiver_is_dropped() {
        let input = "null\n".repeat(100);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let reader = ObservationReader::start(Cursor::new(input), tx);
        let forwarded = tokio::task::spawn_blocking(move || reader.join())
            .await
            .unwrap();
        assert_eq!(forwarded, 0);
    }
}
