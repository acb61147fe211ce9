//! The cosmetic download: a fake virus scan, a pause, then a text file.
//!
//! `DownloadSimulation` is the pure phase machine. `DownloadTimer` is the
//! tokio task that drives it; it aborts when cancelled or dropped, so a
//! dismissed overlay leaves nothing running.

pub mod artifact;

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::catalog::AppRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scanning { progress: u8 },
    Preparing,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEvent {
    Progress(u8),
    Preparing,
    Ready,
}

#[derive(Debug, Clone, Copy)]
pub struct DownloadTiming {
    pub tick: Duration,
    pub step: u8,
    pub prepare_delay: Duration,
}

impl Default for DownloadTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            step: 5,
            prepare_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadSimulation {
    app: AppRecord,
    phase: Phase,
}

impl DownloadSimulation {
    pub fn new(app: AppRecord) -> Self {
        Self {
            app,
            phase: Phase::Scanning { progress: 0 },
        }
    }

    pub fn app(&self) -> &AppRecord {
        &self.app
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Advance on a timer event. Returns true when this event completed the
    /// download. Out-of-order events are ignored.
    pub fn apply(&mut self, event: DownloadEvent) -> bool {
        match (self.phase, event) {
            (Phase::Scanning { progress }, DownloadEvent::Progress(p)) if p > progress => {
                self.phase = Phase::Scanning { progress: p.min(100) };
                false
            }
            (Phase::Scanning { progress: 100 }, DownloadEvent::Preparing) => {
                self.phase = Phase::Preparing;
                false
            }
            (Phase::Preparing, DownloadEvent::Ready) => {
                self.phase = Phase::Ready;
                true
            }
            (phase, event) => {
                tracing::debug!("Ignoring {event:?} while {phase:?}");
                false
            }
        }
    }
}

/// Owned handle to the task feeding `DownloadEvent`s.
#[derive(Debug)]
pub struct DownloadTimer {
    handle: JoinHandle<()>,
}

impl DownloadTimer {
    pub fn spawn(timing: DownloadTiming, tx: mpsc::UnboundedSender<DownloadEvent>) -> Self {
        Self {
            handle: tokio::spawn(drive(timing, tx)),
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DownloadTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn drive(timing: DownloadTiming, tx: mpsc::UnboundedSender<DownloadEvent>) {
    let step = timing.step.max(1);
    let mut ticker = tokio::time::interval_at(Instant::now() + timing.tick, timing.tick);
    let mut progress: u8 = 0;

    loop {
        ticker.tick().await;
        if progress >= 100 {
            break;
        }
        progress = progress.saturating_add(step).min(100);
        if tx.send(DownloadEvent::Progress(progress)).is_err() {
            return;
        }
    }

    if tx.send(DownloadEvent::Preparing).is_err() {
        return;
    }
    tokio::time::sleep(timing.prepare_delay).await;
    let _ = tx.send(DownloadEvent::Ready);
}

/// One download overlay: the simulation plus the timer and channel feeding it.
/// Dropping it tears the timer down.
#[derive(Debug)]
pub struct DownloadRun {
    sim: DownloadSimulation,
    timer: DownloadTimer,
    events: mpsc::UnboundedReceiver<DownloadEvent>,
}

impl DownloadRun {
    /// Must be called inside a tokio runtime.
    pub fn start(app: AppRecord, timing: DownloadTiming) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        tracing::debug!("Starting simulated download of {}", app.name);
        Self {
            sim: DownloadSimulation::new(app),
            timer: DownloadTimer::spawn(timing, tx),
            events,
        }
    }

    pub fn simulation(&self) -> &DownloadSimulation {
        &self.sim
    }

    pub fn phase(&self) -> Phase {
        self.sim.phase()
    }

    /// Apply every event already delivered, without waiting. Returns true if
    /// the download completed during this call.
    pub fn pump(&mut self) -> bool {
        let mut completed = false;
        while let Ok(event) = self.events.try_recv() {
            completed |= self.sim.apply(event);
        }
        completed
    }

    /// Wait for the next event and return the resulting phase, or `None`
    /// once the timer has nothing more to send.
    pub async fn next(&mut self) -> Option<Phase> {
        let event = self.events.recv().await?;
        self.sim.apply(event);
        Some(self.sim.phase())
    }

    pub fn dismiss(self) {
        self.timer.cancel();
    }
}
