//! Keystroke timing features
//!
//! [`FeatureEngine`] consumes an ordered stream of [`KeyEvent`](crate::keyboard::KeyEvent)s
//! and appends samples to one series per [`Metric`]:
//!
//! | Code | Metric | Recorded on | Value |
//! |------|--------|-------------|-------|
//! | K1 | Dwell | release | release − press of the same key |
//! | K2 | Flight | release | own press − previous release |
//! | K3 | Down-Down | press | gap between the last two presses |
//! | K4 | Up-Up | release | gap between the last two releases |
//! | K5 | Since Last Press | press | press − last matched release |
//! | K6 | Speed | release | 60 / (5 × dwell) |
//! | K19 | Input Rate | any | gap × 60 / events so far |
//! | K20 | Pause | any | gap since the previous event |
//! | K22 | Amplitude | release | same as dwell |

mod engine;
mod series;
mod shared;
mod snapshot;

pub use engine::{EngineError, FeatureEngine, DEFAULT_DISPLAY_WINDOW};
pub use series::{Metric, MetricSeries, RecentLog, SeriesSummary};
pub use shared::SharedFeatureEngine;
pub use snapshot::{MetricView, Snapshot};
