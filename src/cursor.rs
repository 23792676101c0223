//! Cursor actuation seam
//!
//! The host cursor primitive is a thin OS call injected by the embedder.
//! The daemon ships a logging actuator for headless operation and a
//! recording actuator for tests.

use crate::error::Result;
use std::sync::{Arc, Mutex};

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Host cursor actuation primitive.
///
/// Coordinates are screen-space pixels, origin top-left, y downward; the
/// mapping stage already inverts y.
pub trait CursorActuator: Send {
    /// Position the pointer absolutely
    fn move_absolute(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press a button at the current position
    fn press(&mut self, button: MouseButton) -> Result<()>;

    /// Release a button at the current position
    fn release(&mut self, button: MouseButton) -> Result<()>;
}

/// Actuator that only logs; used when no OS backend is wired in
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCursor;

impl CursorActuator for LogCursor {
    fn move_absolute(&mut self, x: i32, y: i32) -> Result<()> {
        log::debug!("cursor -> ({}, {})", x, y);
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        log::debug!("press {:?}", button);
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        log::debug!("release {:?}", button);
        Ok(())
    }
}

/// Event captured by `RecordingCursor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    Move { x: i32, y: i32 },
    Press(MouseButton),
    Release(MouseButton),
}

/// Test actuator capturing the emitted event stream
#[derive(Clone, Default)]
pub struct RecordingCursor {
    events: Arc<Mutex<Vec<CursorEvent>>>,
}

impl RecordingCursor {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far
    pub fn events(&self) -> Vec<CursorEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CursorActuator for RecordingCursor {
    fn move_absolute(&mut self, x: i32, y: i32) -> Result<()> {
        self.events.lock().unwrap().push(CursorEvent::Move { x, y });
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.events.lock().unwrap().push(CursorEvent::Press(button));
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(CursorEvent::Release(button));
        Ok(())
    }
}
