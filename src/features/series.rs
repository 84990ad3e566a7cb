//! Metric identifiers, append-only sample series and bounded recency logs

use crate::keyboard::KeyId;
use std::collections::VecDeque;

/// The timing metrics the engine records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// K1: release minus press of the same key
    Dwell,
    /// K2: own press minus the previous key's release, recorded at release
    Flight,
    /// K3: gap between the two most recent presses
    DownDown,
    /// K4: gap between the two most recent releases
    UpUp,
    /// K5: press minus the last matched release
    SinceLastPress,
    /// K6: words per minute from the latest dwell
    Speed,
    /// K19: inter-event gap scaled per minute over events seen so far
    InputRate,
    /// K20: raw inter-event gap
    Pause,
    /// K22: latest dwell, kept for peak analysis
    Amplitude,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Self::Dwell,
        Self::Flight,
        Self::DownDown,
        Self::UpUp,
        Self::SinceLastPress,
        Self::Speed,
        Self::InputRate,
        Self::Pause,
        Self::Amplitude,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Dwell => "K1",
            Self::Flight => "K2",
            Self::DownDown => "K3",
            Self::UpUp => "K4",
            Self::SinceLastPress => "K5",
            Self::Speed => "K6",
            Self::InputRate => "K19",
            Self::Pause => "K20",
            Self::Amplitude => "K22",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dwell => "Dwell",
            Self::Flight => "Flight",
            Self::DownDown => "Down-Down",
            Self::UpUp => "Up-Up",
            Self::SinceLastPress => "Since Last Press",
            Self::Speed => "Speed",
            Self::InputRate => "Input Rate",
            Self::Pause => "Pause",
            Self::Amplitude => "Amplitude",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Speed => "wpm",
            Self::InputRate => "/min",
            _ => "s",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Dwell => 0,
            Self::Flight => 1,
            Self::DownDown => 2,
            Self::UpUp => 3,
            Self::SinceLastPress => 4,
            Self::Speed => 5,
            Self::InputRate => 6,
            Self::Pause => 7,
            Self::Amplitude => 8,
        }
    }
}

/// Append-only sequence of samples for one metric.
///
/// Sum and extremes are kept up to date on every push.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    values: Vec<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// The most recent `n` samples, oldest first
    pub fn last_n(&self, n: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let last = self.last()?;
        let count = self.values.len();
        Some(SeriesSummary {
            count,
            last,
            mean: self.sum / count as f64,
            min: self.min,
            max: self.max,
        })
    }
}

impl Default for MetricSeries {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate view of a series for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub last: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Chronological `(key, timestamp)` log that keeps only the newest entries
#[derive(Debug, Clone)]
pub struct RecentLog {
    entries: VecDeque<(KeyId, f64)>,
    capacity: usize,
}

impl RecentLog {
    /// Two entries is all the engine ever reads
    pub const DEFAULT_CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, key: KeyId, timestamp: f64) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, timestamp));
    }

    /// Number of entries retained
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<(KeyId, f64)> {
        self.entries.back().copied()
    }

    /// The entry immediately before the latest one
    pub fn previous(&self) -> Option<(KeyId, f64)> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2).copied()
    }
}

impl Default for RecentLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_codes_and_indices() {
        let codes: Vec<&str> = Metric::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes, ["K1", "K2", "K3", "K4", "K5", "K6", "K19", "K20", "K22"]);
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        assert_eq!(Metric::Speed.unit(), "wpm");
        assert_eq!(Metric::Dwell.unit(), "s");
    }

    #[test]
    fn series_last_n_returns_suffix() {
        let mut series = MetricSeries::new();
        assert!(series.last_n(5).is_empty());

        for v in 1..=7 {
            series.push(v as f64);
        }
        assert_eq!(series.last_n(5), &[3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(series.last_n(100).len(), 7);
        assert_eq!(series.last(), Some(7.0));
        assert_eq!(series.len(), 7);
    }

    #[test]
    fn summary_of_empty_series_is_none() {
        assert!(MetricSeries::new().summary().is_none());
    }

    #[test]
    fn summary_tracks_extremes() {
        let mut series = MetricSeries::new();
        for v in [0.2, 0.1, 0.3] {
            series.push(v);
        }
        let summary = series.summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.last, 0.3);
        assert_eq!(summary.min, 0.1);
        assert_eq!(summary.max, 0.3);
        assert!((summary.mean - 0.2).abs() < 1e-12);
    }

    #[test]
    fn summary_follows_later_pushes() {
        let mut series = MetricSeries::new();
        series.push(-1.0);
        assert_eq!(series.summary().unwrap().max, -1.0);

        series.push(4.0);
        series.push(0.0);
        let summary = series.summary().unwrap();
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.last, 0.0);
        assert!((summary.mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn recent_log_keeps_two_newest() {
        let mut log = RecentLog::new();
        assert!(log.previous().is_none());

        log.push(KeyId::Char('a'), 0.0);
        assert_eq!(log.latest(), Some((KeyId::Char('a'), 0.0)));
        assert!(log.previous().is_none());

        log.push(KeyId::Char('b'), 0.1);
        log.push(KeyId::Char('c'), 0.2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.previous(), Some((KeyId::Char('b'), 0.1)));
        assert_eq!(log.latest(), Some((KeyId::Char('c'), 0.2)));
    }

    #[test]
    fn recent_log_capacity_floor_is_two() {
        let mut log = RecentLog::with_capacity(0);
        log.push(KeyId::Char('a'), 0.0);
        log.push(KeyId::Char('a'), 0.1);
        assert_eq!(log.len(), 2);
    }
}
