//! Keyboard event types and listener

use super::keymap::{is_shift, key_id_for};
use super::KeyId;
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::sync::mpsc;
use std::time::Instant;

/// Type of keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down
    Press,
    /// Key was released
    Release,
}

/// A keyboard event with timing information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    /// Identity of the key
    pub key: KeyId,
    /// Type of event (press/release)
    pub event_type: KeyEventType,
    /// Seconds on the source's clock
    pub timestamp: f64,
}

impl KeyEvent {
    pub fn new(key: impl Into<KeyId>, event_type: KeyEventType, timestamp: f64) -> Self {
        Self {
            key: key.into(),
            event_type,
            timestamp,
        }
    }

    pub fn press(key: impl Into<KeyId>, timestamp: f64) -> Self {
        Self::new(key, KeyEventType::Press, timestamp)
    }

    pub fn release(key: impl Into<KeyId>, timestamp: f64) -> Self {
        Self::new(key, KeyEventType::Release, timestamp)
    }

    pub fn is_press(&self) -> bool {
        self.event_type == KeyEventType::Press
    }
}

/// Turns successive held-key sets into press/release events.
///
/// The identity assigned at press is reused for the matching release, so a key
/// pressed as `'a'` is released as `'a'` even if shift went down meanwhile.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: Vec<(Keycode, KeyId)>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `current` against the previous set. Presses come before releases.
    pub fn diff(&mut self, current: &[Keycode], timestamp: f64) -> Vec<KeyEvent> {
        let shifted = current.iter().any(is_shift);
        let mut events = Vec::new();

        for key in current {
            if !self.held.iter().any(|(k, _)| k == key) {
                let id = key_id_for(*key, shifted);
                self.held.push((*key, id));
                events.push(KeyEvent::press(id, timestamp));
            }
        }

        let mut still_held = Vec::with_capacity(self.held.len());
        for (key, id) in self.held.drain(..) {
            if current.contains(&key) {
                still_held.push((key, id));
            } else {
                events.push(KeyEvent::release(id, timestamp));
            }
        }
        self.held = still_held;

        events
    }

    /// Number of keys currently held
    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

/// Keyboard listener that polls for key state changes
pub struct KeyboardListener {
    device_state: DeviceState,
    tracker: KeyTracker,
    origin: Instant,
    event_tx: mpsc::Sender<KeyEvent>,
}

impl KeyboardListener {
    /// Create a new keyboard listener. Timestamps count from this moment.
    pub fn new(event_tx: mpsc::Sender<KeyEvent>) -> Self {
        Self {
            device_state: DeviceState::new(),
            tracker: KeyTracker::new(),
            origin: Instant::now(),
            event_tx,
        }
    }

    /// Poll for keyboard state changes.
    ///
    /// Returns the number of events sent, or an error once the receiving side
    /// has hung up.
    pub fn poll(&mut self) -> Result<usize, mpsc::SendError<KeyEvent>> {
        let now = self.origin.elapsed().as_secs_f64();
        let current_keys = self.device_state.get_keys();

        let events = self.tracker.diff(&current_keys, now);
        let count = events.len();
        for event in events {
            self.event_tx.send(event)?;
        }
        Ok(count)
    }
}
