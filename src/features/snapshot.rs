//! Read-only projection of the engine for display

use super::engine::FeatureEngine;
use super::series::{Metric, SeriesSummary};
use crate::keyboard::CategoryTally;

/// Recent samples of one metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub metric: Metric,
    /// Up to the display window of the newest samples, oldest first
    pub recent: Vec<f64>,
    /// Aggregate over the whole series
    pub summary: Option<SeriesSummary>,
}

/// Owned copy of the engine's current feature values
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_events: u64,
    pub category_tally: CategoryTally,
    pub metrics: Vec<MetricView>,
}

impl Snapshot {
    pub(crate) fn capture(engine: &FeatureEngine, window: usize) -> Self {
        let metrics = Metric::ALL
            .iter()
            .map(|&metric| {
                let series = engine.series(metric);
                MetricView {
                    metric,
                    recent: series.last_n(window).to_vec(),
                    summary: series.summary(),
                }
            })
            .collect();

        Self {
            total_events: engine.total_events(),
            category_tally: *engine.category_tally(),
            metrics,
        }
    }

    /// Recent samples of `metric`
    pub fn recent(&self, metric: Metric) -> &[f64] {
        self.view(metric).map(|v| v.recent.as_slice()).unwrap_or(&[])
    }

    pub fn view(&self, metric: Metric) -> Option<&MetricView> {
        self.metrics.iter().find(|v| v.metric == metric)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        FeatureEngine::new().snapshot()
    }
}
