//! Keystroke Features - live keystroke-dynamics feature extraction
//!
//! Consumes key press/release events and maintains timing metrics (dwell,
//! flight, down-down, up-up, typing speed, input rate, pauses) plus a
//! per-category press tally, for keystroke-dynamics analysis.
//!
//! ```
//! use keystroke_features::features::{FeatureEngine, Metric};
//! use keystroke_features::keyboard::KeyEvent;
//!
//! let mut engine = FeatureEngine::new();
//! engine.update(&KeyEvent::press('a', 0.0)).unwrap();
//! engine.update(&KeyEvent::release('a', 0.1)).unwrap();
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.total_events, 2);
//! assert_eq!(snapshot.recent(Metric::Dwell).len(), 1);
//! ```

pub mod config;
pub mod features;
pub mod keyboard;
pub mod ui;

pub use config::Config;
pub use features::{FeatureEngine, SharedFeatureEngine, Snapshot};
