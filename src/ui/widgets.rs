//! Custom TUI widgets

use super::theme::ThemeColors;
use crate::features::{Metric, MetricView};
use crate::keyboard::CategoryTally;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Format samples for display, oldest first
pub fn format_samples(metric: Metric, samples: &[f64]) -> String {
    if samples.is_empty() {
        return "-".to_string();
    }
    samples
        .iter()
        .map(|v| format_value(metric, *v))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format one value with the precision that suits its unit
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Speed | Metric::InputRate => format!("{:.1}", value),
        _ => format!("{:.3}", value),
    }
}

fn panel_block<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(colors.dim))
}

/// Widget listing the per-category press counts
pub struct TallyPanel<'a> {
    tally: &'a CategoryTally,
    colors: ThemeColors,
}

impl<'a> TallyPanel<'a> {
    pub fn new(tally: &'a CategoryTally, colors: ThemeColors) -> Self {
        Self { tally, colors }
    }
}

impl<'a> Widget for TallyPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Key Counts ", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, (category, count)) in self.tally.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let count_style = if count > 0 {
                Style::default().fg(self.colors.value)
            } else {
                Style::default().fg(self.colors.dim)
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<12}", category.name()),
                    Style::default().fg(self.colors.fg),
                ),
                Span::styled(format!("{:>6}", count), count_style),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

/// Widget showing the recent samples of every metric
pub struct MetricsPanel<'a> {
    metrics: &'a [MetricView],
    colors: ThemeColors,
}

impl<'a> MetricsPanel<'a> {
    pub fn new(metrics: &'a [MetricView], colors: ThemeColors) -> Self {
        Self { metrics, colors }
    }
}

impl<'a> Widget for MetricsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Features ", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;
        for view in self.metrics {
            if y >= inner.y + inner.height {
                break;
            }
            let metric = view.metric;

            let summary = match &view.summary {
                Some(s) => format!(
                    "n={} mean={} max={}",
                    s.count,
                    format_value(metric, s.mean),
                    format_value(metric, s.max)
                ),
                None => String::new(),
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<4}", metric.code()),
                    Style::default().fg(self.colors.accent),
                ),
                Span::styled(
                    format!("{:<17}", format!("{} ({})", metric.label(), metric.unit())),
                    Style::default().fg(self.colors.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<44}", format_samples(metric, &view.recent)),
                    Style::default().fg(self.colors.value),
                ),
                Span::styled(summary, Style::default().fg(self.colors.summary)),
            ]);

            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }
    }
}

/// Widget for the help screen
pub struct HelpPanel {
    colors: ThemeColors,
}

impl HelpPanel {
    pub fn new(colors: ThemeColors) -> Self {
        Self { colors }
    }
}

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Help - Keystroke Features ", &self.colors);
        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = [
            "",
            " CONTROLS",
            " -----------",
            " q / Esc / Ctrl-C : Quit",
            " Space            : Freeze/unfreeze the display (capture continues)",
            " r                : Reset all features",
            " ? / Tab          : Toggle this help",
            "",
            " FEATURES",
            " -----------",
            " K1  Dwell        : how long a key is held",
            " K2  Flight       : previous release to this key's press",
            " K3  Down-Down    : between consecutive presses",
            " K4  Up-Up        : between consecutive releases",
            " K5  Since Press  : last release to the next press",
            " K6  Speed        : words per minute from the last dwell",
            " K19 Input Rate   : event gap scaled per minute",
            " K20 Pause        : gap between any two events",
            " K22 Amplitude    : latest dwell, for peak analysis",
            "",
            " Keys are captured system-wide, not only in this window.",
        ];

        for (i, line) in help_text.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let style = if line.contains("---") {
                Style::default().fg(self.colors.dim)
            } else if line.len() > 1 && line[1..].chars().all(|c| c.is_ascii_uppercase()) {
                Style::default()
                    .fg(self.colors.summary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.fg)
            };
            buf.set_string(inner.x, inner.y + i as u16, line, style);
        }
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    state: &'a str,
    elapsed: &'a str,
    events: u64,
    pending: usize,
    message: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a str, elapsed: &'a str, events: u64, colors: ThemeColors) -> Self {
        Self {
            state,
            elapsed,
            events,
            pending: 0,
            message: None,
            colors,
        }
    }

    /// Number of keys currently held down
    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(self.colors.bar_bg).fg(self.colors.fg);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        let left = format!(" {} | Held: {} ", self.state, self.pending);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        if let Some(msg) = self.message {
            let msg_style = Style::default().bg(self.colors.bar_bg).fg(self.colors.notice);
            let msg_x = area.x + (area.width / 2).saturating_sub(msg.len() as u16 / 2);
            buf.set_string(msg_x, area.y, msg, msg_style);
        }

        let right = format!(" {} | Events: {} ", self.elapsed, self.events);
        let right_x = area.x + area.width.saturating_sub(right.len() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}
