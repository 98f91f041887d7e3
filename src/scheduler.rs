// src/scheduler.rs

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::config::clamp_interval;

const THREAD_NAME: &str = "eventaudio-update";

/// Drives a tick callback at a fixed period on a dedicated thread.
///
/// The cadence does not depend on any host frame loop. Stopping joins the
/// thread: a tick already in flight finishes, and nothing runs afterwards.
#[derive(Default)]
pub struct UpdateScheduler {
    worker: Option<Worker>,
}

struct Worker {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking every `interval`. No-op when already running.
    ///
    /// `interval` is clamped the same way as `RuntimeConfig::update_interval`.
    pub fn start<F>(&mut self, interval: Duration, mut tick: F) -> io::Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if self.worker.is_some() {
            return Ok(());
        }

        let interval = clamp_interval(interval);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let mut deadline = next_deadline(Instant::now(), interval);
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            tick();
                            // Don't try to catch up after a stall.
                            deadline = next_deadline(deadline, interval);
                            let now = Instant::now();
                            if deadline < now {
                                deadline = next_deadline(now, interval);
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        debug!("Update scheduler started ({:?} interval)", interval);
        self.worker = Some(Worker { stop_tx, thread });
        Ok(())
    }

    /// Cancel pending ticks and wait for the thread to exit. No-op when stopped.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        let _ = worker.stop_tx.send(());
        if worker.thread.join().is_err() {
            error!("Update thread panicked");
        }
        debug!("Update scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

/// `from + interval`, saturating far in the future instead of overflowing.
fn next_deadline(from: Instant, interval: Duration) -> Instant {
    from.checked_add(interval)
        .or_else(|| from.checked_add(Duration::from_secs(86_400)))
        .unwrap_or(from)
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
