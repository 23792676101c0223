//! Pointer runner: run-state machine and fixed-cadence polling loop
//!
//! The runner is Idle until `start`, then a dedicated worker thread owns
//! the scanner, the cursor and the pipeline's smoothing state, polling at a
//! fixed cadence until `stop`. Stop is cooperative: the flag is checked
//! once per cycle boundary, so stop latency is at most one cycle's frame
//! acquisition plus pipeline time.
//!
//! Per-cycle errors are logged and the loop continues; only start-up
//! failures prevent the run from beginning. Expected no-detection epochs
//! are kept distinct from errors in both logs and statistics.

use crate::calibration::CalibrationHandle;
use crate::cursor::{CursorActuator, MouseButton};
use crate::error::{Error, Result};
use crate::pipeline::{CycleOutcome, PointerPipeline, ScanWindow};
use crate::scanner::Scanner;
use crate::types::ScreenGeometry;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Counters reported by a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Polling cycles executed
    pub cycles: u64,
    /// Cursor positions emitted
    pub positions: u64,
    /// Epochs that flushed without a detection
    pub empty_epochs: u64,
    /// Cycles skipped due to an error
    pub errors: u64,
}

/// Pointer run-state machine
pub struct PointerRunner {
    calibration: CalibrationHandle,
    window: ScanWindow,
    screen: ScreenGeometry,
    tick: Duration,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<RunStats>>,
}

impl PointerRunner {
    /// Create an idle runner
    pub fn new(
        calibration: CalibrationHandle,
        window: ScanWindow,
        screen: ScreenGeometry,
        tick: Duration,
    ) -> Self {
        Self {
            calibration,
            window,
            screen,
            tick,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Whether the polling worker is active
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Enter Running: take ownership of the scanner and cursor and spawn
    /// the polling worker.
    ///
    /// Calibration is re-validated here so a degenerate region can never
    /// reach the mapping arithmetic of a live loop.
    pub fn start(
        &mut self,
        scanner: Box<dyn Scanner>,
        cursor: Box<dyn CursorActuator>,
    ) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::Other("pointer runner already started".into()));
        }
        self.calibration.snapshot().validate()?;

        self.running.store(true, Ordering::Relaxed);

        let calibration = self.calibration.clone();
        let pipeline = PointerPipeline::new(self.window, self.screen);
        let tick = self.tick;
        let running = Arc::clone(&self.running);

        let worker = thread::Builder::new()
            .name("pointer".to_string())
            .spawn(move || run_loop(scanner, cursor, calibration, pipeline, tick, running))
            .map_err(|e| Error::Other(format!("failed to spawn pointer worker: {}", e)))?;
        self.worker = Some(worker);

        Ok(())
    }

    /// Request stop and wait for the worker to finish its current cycle
    pub fn stop(&mut self) -> Option<RunStats> {
        self.running.store(false, Ordering::Relaxed);
        let stats = self.worker.take().and_then(|w| w.join().ok());
        if let Some(s) = stats {
            info!(
                "Run finished: {} cycles, {} positions, {} empty epochs, {} errors",
                s.cycles, s.positions, s.empty_epochs, s.errors
            );
        }
        stats
    }
}

impl Drop for PointerRunner {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

fn run_loop(
    mut scanner: Box<dyn Scanner>,
    mut cursor: Box<dyn CursorActuator>,
    calibration: CalibrationHandle,
    mut pipeline: PointerPipeline,
    tick: Duration,
    running: Arc<AtomicBool>,
) -> RunStats {
    info!("Pointer loop running ({} ms cadence)", tick.as_millis());
    let mut stats = RunStats::default();

    while running.load(Ordering::Relaxed) {
        let cycle_start = Instant::now();
        stats.cycles += 1;

        match run_cycle(
            scanner.as_mut(),
            cursor.as_mut(),
            &calibration,
            &mut pipeline,
        ) {
            Ok(CycleOutcome::Position(p)) => {
                stats.positions += 1;
                debug!("position ({}, {})", p.x, p.y);
            }
            Ok(CycleOutcome::NoDetection) => {
                stats.empty_epochs += 1;
                debug!("no detection this epoch");
            }
            Ok(CycleOutcome::Pending) => {}
            Err(Error::Timeout) => {
                stats.errors += 1;
                warn!("frame acquisition timed out, skipping cycle");
            }
            Err(e) => {
                stats.errors += 1;
                error!("cycle failed: {}", e);
            }
        }

        // Fixed cadence: sleep whatever remains of the tick
        if let Some(remaining) = tick.checked_sub(cycle_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    if let Err(e) = scanner.disconnect() {
        warn!("scanner disconnect failed: {}", e);
    }
    stats
}

/// One polling cycle: snapshot calibration, acquire a frame, run the
/// pipeline, actuate on a flushed position
fn run_cycle(
    scanner: &mut dyn Scanner,
    cursor: &mut dyn CursorActuator,
    calibration: &CalibrationHandle,
    pipeline: &mut PointerPipeline,
) -> Result<CycleOutcome> {
    let snapshot = calibration.snapshot();
    let frame = scanner.get_frame()?;
    let outcome = pipeline.process(&frame, &snapshot)?;

    if let CycleOutcome::Position(p) = outcome {
        cursor.move_absolute(p.x, p.y)?;
        if snapshot.auto_click {
            cursor.press(MouseButton::Left)?;
            cursor.release(MouseButton::Left)?;
        }
    }

    Ok(outcome)
}
