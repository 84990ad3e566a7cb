//! The feature engine: temporal bookkeeping over a press/release stream

use super::series::{Metric, MetricSeries, RecentLog};
use super::snapshot::Snapshot;
use crate::keyboard::{categorize, CategoryTally, KeyEvent, KeyEventType, KeyId};
use log::{debug, trace};
use std::collections::HashMap;
use thiserror::Error;

/// Number of recent samples per series a snapshot exposes by default
pub const DEFAULT_DISPLAY_WINDOW: usize = 5;

/// Characters per word for the speed estimate
const CHARS_PER_WORD: f64 = 5.0;

/// Reasons an event is refused. A refused event leaves the engine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    #[error("event at {timestamp}s is earlier than the last event at {last}s")]
    OutOfOrder { timestamp: f64, last: f64 },
    #[error("event timestamp {0} is not a finite number")]
    NonFiniteTimestamp(f64),
}

/// Stateful keystroke feature extractor.
///
/// Feed it every press and release in chronological order through
/// [`FeatureEngine::update`]; read the current values with
/// [`FeatureEngine::snapshot`].
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    /// Most recent unmatched press per key
    press_ledger: HashMap<KeyId, f64>,
    press_log: RecentLog,
    release_log: RecentLog,
    last_event_at: Option<f64>,
    last_matched_release_at: Option<f64>,
    tally: CategoryTally,
    series: [MetricSeries; 9],
    total_events: u64,
    display_window: usize,
}

impl FeatureEngine {
    pub fn new() -> Self {
        Self::with_display_window(DEFAULT_DISPLAY_WINDOW)
    }

    pub fn with_display_window(display_window: usize) -> Self {
        debug!("Feature engine created (display window {})", display_window);
        Self {
            press_ledger: HashMap::new(),
            press_log: RecentLog::new(),
            release_log: RecentLog::new(),
            last_event_at: None,
            last_matched_release_at: None,
            tally: CategoryTally::new(),
            series: Default::default(),
            total_events: 0,
            display_window,
        }
    }

    /// Process one event.
    ///
    /// Metrics whose prerequisites are missing are skipped for this event;
    /// only a non-finite or out-of-order timestamp is refused.
    pub fn update(&mut self, event: &KeyEvent) -> Result<(), EngineError> {
        let t = event.timestamp;
        if !t.is_finite() {
            debug!("Rejected {:?} of {}: non-finite timestamp", event.event_type, event.key);
            return Err(EngineError::NonFiniteTimestamp(t));
        }
        if let Some(last) = self.last_event_at {
            if t < last {
                debug!("Rejected {:?} of {} at {}: last event at {}", event.event_type, event.key, t, last);
                return Err(EngineError::OutOfOrder { timestamp: t, last });
            }
        }

        trace!("{:?} {} at {:.6}", event.event_type, event.key, t);
        match event.event_type {
            KeyEventType::Press => self.on_press(event.key, t),
            KeyEventType::Release => self.on_release(event.key, t),
        }
        self.record_event_gap(t);
        Ok(())
    }

    fn on_press(&mut self, key: KeyId, t: f64) {
        self.press_ledger.insert(key, t);
        self.press_log.push(key, t);
        self.tally.increment(categorize(&key));

        if let Some((_, previous)) = self.press_log.previous() {
            self.push(Metric::DownDown, t - previous);
        }

        match self.last_matched_release_at {
            Some(released) => self.push(Metric::SinceLastPress, t - released),
            None => trace!("No matched release yet, skipping {}", Metric::SinceLastPress.code()),
        }
    }

    fn on_release(&mut self, key: KeyId, t: f64) {
        self.release_log.push(key, t);

        let pressed = self.press_ledger.remove(&key);
        let dwell = pressed.map(|pressed| t - pressed);
        match dwell {
            Some(dwell) => {
                self.push(Metric::Dwell, dwell);
                self.push(Metric::Amplitude, dwell);
            }
            None => trace!("Release of {} has no pending press", key),
        }

        if let Some((_, previous_release)) = self.release_log.previous() {
            // Flight needs this release's own press; a repeat release has none
            if let Some(pressed) = pressed {
                self.push(Metric::Flight, pressed - previous_release);
            }
            self.push(Metric::UpUp, t - previous_release);
        }

        if let Some(dwell) = dwell {
            match words_per_minute(dwell) {
                Some(wpm) => self.push(Metric::Speed, wpm),
                None => trace!("Degenerate dwell {}, skipping {}", dwell, Metric::Speed.code()),
            }
            self.last_matched_release_at = Some(t);
        }
    }

    /// Pause and input-rate bookkeeping shared by presses and releases
    fn record_event_gap(&mut self, t: f64) {
        if let Some(last) = self.last_event_at {
            let gap = t - last;
            self.push(Metric::Pause, gap);
            let rate = if self.total_events == 0 {
                0.0
            } else {
                gap * 60.0 / self.total_events as f64
            };
            self.push(Metric::InputRate, rate);
        }
        self.total_events += 1;
        self.last_event_at = Some(t);
    }

    fn push(&mut self, metric: Metric, value: f64) {
        self.series[metric.index()].push(value);
    }

    /// Full series for a metric
    pub fn series(&self, metric: Metric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    /// Number of events accepted so far
    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    pub fn category_tally(&self) -> &CategoryTally {
        &self.tally
    }

    /// Timestamp of the unmatched press for `key`, if any
    pub fn pending_press(&self, key: &KeyId) -> Option<f64> {
        self.press_ledger.get(key).copied()
    }

    /// Number of keys pressed and not yet released
    pub fn pending_count(&self) -> usize {
        self.press_ledger.len()
    }

    pub fn display_window(&self) -> usize {
        self.display_window
    }

    /// Read-only copy of the current values
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self, self.display_window)
    }
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Words per minute for one keystroke held `dwell` seconds
fn words_per_minute(dwell: f64) -> Option<f64> {
    if dwell <= 0.0 {
        return None;
    }
    let wpm = 60.0 / (CHARS_PER_WORD * dwell);
    wpm.is_finite().then_some(wpm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Category, NamedKey};

    fn feed(engine: &mut FeatureEngine, events: &[KeyEvent]) {
        for event in events {
            engine.update(event).unwrap();
        }
    }

    fn values(engine: &FeatureEngine, metric: Metric) -> Vec<f64> {
        engine.series(metric).values().to_vec()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn single_tap_records_dwell_and_speed() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 0.0), KeyEvent::release('a', 0.1)]);

        assert_close(&values(&engine, Metric::Dwell), &[0.1]);
        assert_close(&values(&engine, Metric::Amplitude), &[0.1]);
        assert_close(&values(&engine, Metric::Speed), &[120.0]);
        assert!(engine.pending_press(&KeyId::Char('a')).is_none());
    }

    #[test]
    fn overlapping_presses_record_down_down() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 0.0), KeyEvent::press('b', 0.05)]);

        assert_close(&values(&engine, Metric::DownDown), &[0.05]);
        assert_eq!(engine.pending_press(&KeyId::Char('a')), Some(0.0));
        assert_eq!(engine.pending_press(&KeyId::Char('b')), Some(0.05));
        assert_eq!(engine.pending_count(), 2);
    }

    #[test]
    fn two_taps_record_flight_metrics() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.1),
                KeyEvent::press('b', 0.3),
                KeyEvent::release('b', 0.4),
            ],
        );

        assert_close(&values(&engine, Metric::SinceLastPress), &[0.2]);
        assert_close(&values(&engine, Metric::Flight), &[0.2]);
        assert_close(&values(&engine, Metric::UpUp), &[0.3]);
        assert_close(&values(&engine, Metric::DownDown), &[0.3]);
        assert_close(&values(&engine, Metric::Pause), &[0.1, 0.2, 0.1]);
    }

    #[test]
    fn unmatched_release_only_counts_the_event() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::release('z', 1.0)]);

        assert_eq!(engine.total_events(), 1);
        assert!(engine.series(Metric::Dwell).is_empty());
        assert!(engine.series(Metric::Speed).is_empty());
        assert_eq!(engine.category_tally().total(), 0);
    }

    #[test]
    fn unmatched_release_mid_session_skips_speed() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.1),
                KeyEvent::release('z', 0.2),
            ],
        );

        assert_eq!(engine.series(Metric::Dwell).len(), 1);
        assert_eq!(engine.series(Metric::Speed).len(), 1);
        // The release still counts for up-up timing
        assert_close(&values(&engine, Metric::UpUp), &[0.1]);
    }

    #[test]
    fn unmatched_release_does_not_move_since_last_press_anchor() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.1),
                KeyEvent::release('z', 0.5),
                KeyEvent::press('b', 0.6),
            ],
        );

        assert_close(&values(&engine, Metric::SinceLastPress), &[0.5]);
    }

    #[test]
    fn zero_dwell_skips_speed() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 1.0), KeyEvent::release('a', 1.0)]);

        assert_close(&values(&engine, Metric::Dwell), &[0.0]);
        assert!(engine.series(Metric::Speed).is_empty());
    }

    #[test]
    fn repeated_press_overwrites_ledger() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::press('a', 0.5),
                KeyEvent::release('a', 0.6),
            ],
        );

        assert_close(&values(&engine, Metric::Dwell), &[0.1]);
        assert_close(&values(&engine, Metric::DownDown), &[0.5]);
    }

    #[test]
    fn second_release_of_same_key_does_not_rematch() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.1),
                KeyEvent::release('a', 0.2),
            ],
        );

        assert_eq!(engine.series(Metric::Dwell).len(), 1);
    }

    #[test]
    fn repeat_release_skips_flight() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.1),
                KeyEvent::press('b', 0.3),
                KeyEvent::release('b', 0.4),
                KeyEvent::release('b', 0.5),
            ],
        );

        assert_close(&values(&engine, Metric::Flight), &[0.2]);
        assert_close(&values(&engine, Metric::UpUp), &[0.3, 0.1]);
    }

    #[test]
    fn input_rate_scales_gap_by_prior_events() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press('a', 0.0),
                KeyEvent::release('a', 0.5),
                KeyEvent::press('b', 1.5),
            ],
        );

        // gap 0.5 over 1 prior event, gap 1.0 over 2 prior events
        assert_close(&values(&engine, Metric::InputRate), &[30.0, 30.0]);
        assert_close(&values(&engine, Metric::Pause), &[0.5, 1.0]);
    }

    #[test]
    fn first_event_records_no_gap() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 3.0)]);

        assert!(engine.series(Metric::Pause).is_empty());
        assert!(engine.series(Metric::InputRate).is_empty());
        assert!(engine.series(Metric::SinceLastPress).is_empty());
    }

    #[test]
    fn tally_counts_presses_by_category() {
        let mut engine = FeatureEngine::new();
        feed(
            &mut engine,
            &[
                KeyEvent::press(NamedKey::ShiftLeft, 0.0),
                KeyEvent::press('H', 0.1),
                KeyEvent::release('H', 0.2),
                KeyEvent::release(NamedKey::ShiftLeft, 0.25),
                KeyEvent::press('i', 0.3),
                KeyEvent::release('i', 0.35),
                KeyEvent::press(NamedKey::Backspace, 0.5),
            ],
        );

        let tally = engine.category_tally();
        assert_eq!(tally.get(Category::Function), 1);
        assert_eq!(tally.get(Category::Uppercase), 1);
        assert_eq!(tally.get(Category::Letter), 1);
        assert_eq!(tally.get(Category::Delete), 1);
        assert_eq!(tally.total(), 4);
        assert_eq!(engine.total_events(), 7);
    }

    #[test]
    fn out_of_order_event_is_rejected_without_side_effects() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 1.0)]);

        let err = engine.update(&KeyEvent::release('a', 0.5)).unwrap_err();
        assert_eq!(err, EngineError::OutOfOrder { timestamp: 0.5, last: 1.0 });
        assert_eq!(engine.total_events(), 1);
        assert!(engine.series(Metric::Dwell).is_empty());
        assert_eq!(engine.pending_press(&KeyId::Char('a')), Some(1.0));
    }

    #[test]
    fn non_finite_timestamp_is_rejected() {
        let mut engine = FeatureEngine::new();
        let err = engine.update(&KeyEvent::press('a', f64::NAN)).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteTimestamp(_)));
        assert_eq!(engine.total_events(), 0);
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let mut engine = FeatureEngine::new();
        feed(&mut engine, &[KeyEvent::press('a', 2.0), KeyEvent::press('b', 2.0)]);
        assert_close(&values(&engine, Metric::DownDown), &[0.0]);
    }

    #[test]
    fn words_per_minute_guards_degenerate_dwell() {
        assert_eq!(words_per_minute(0.0), None);
        assert_eq!(words_per_minute(-0.1), None);
        assert_eq!(words_per_minute(f64::MIN_POSITIVE / 1e10), None);
        assert_eq!(words_per_minute(0.2), Some(60.0));
    }
}
