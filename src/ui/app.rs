//! Main application state and logic

use super::theme::ThemeColors;
use crate::config::Config;
use crate::features::{SharedFeatureEngine, Snapshot};
use log::info;
use std::time::Instant;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Features,
    Help,
}

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Display follows the engine
    Running,
    /// Display frozen; capture continues
    Paused,
    Quitting,
}

impl AppState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Quitting => "QUITTING",
        }
    }
}

/// Display side of the application. Reads the engine, never feeds it.
pub struct App {
    pub view: AppView,
    pub state: AppState,
    pub config: Config,
    pub colors: ThemeColors,
    engine: SharedFeatureEngine,
    /// Last snapshot pulled from the engine
    pub snapshot: Snapshot,
    /// Keys held at the last refresh
    pub pending: usize,
    pub start_time: Instant,
    status_message: Option<String>,
    status_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, engine: SharedFeatureEngine) -> Self {
        let snapshot = engine.snapshot();
        Self {
            view: AppView::Features,
            state: AppState::Running,
            colors: ThemeColors::from_theme(config.ui.theme),
            config,
            engine,
            snapshot,
            pending: 0,
            start_time: Instant::now(),
            status_message: None,
            status_time: None,
        }
    }

    /// Pull a fresh snapshot unless the display is frozen
    pub fn refresh(&mut self) {
        if self.state != AppState::Running {
            return;
        }
        let (snapshot, pending) = self
            .engine
            .with_engine(|engine| (engine.snapshot(), engine.pending_count()));
        self.snapshot = snapshot;
        self.pending = pending;
    }

    pub fn toggle_help(&mut self) {
        self.view = match self.view {
            AppView::Features => AppView::Help,
            AppView::Help => AppView::Features,
        };
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            AppState::Running => {
                self.set_status("Display frozen".to_string());
                AppState::Paused
            }
            AppState::Paused => {
                self.set_status("Display live".to_string());
                AppState::Running
            }
            AppState::Quitting => AppState::Quitting,
        };
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Discard all collected features and start over
    pub fn reset(&mut self) {
        self.engine.reset();
        info!("Feature engine reset from the UI");
        self.snapshot = self.engine.snapshot();
        self.pending = 0;
        self.set_status("Features reset".to_string());
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still valid (within 3 seconds)
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed().as_secs() < 3 => Some(msg),
            _ => None,
        }
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), SharedFeatureEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyEvent;

    #[test]
    fn refresh_follows_engine() {
        let engine = SharedFeatureEngine::default();
        let mut app = App::new(Config::default(), engine.clone());
        assert_eq!(app.snapshot.total_events, 0);

        engine.update(&KeyEvent::press('a', 0.0)).unwrap();
        app.refresh();
        assert_eq!(app.snapshot.total_events, 1);
        assert_eq!(app.pending, 1);
    }

    #[test]
    fn paused_display_keeps_old_snapshot() {
        let engine = SharedFeatureEngine::default();
        let mut app = App::new(Config::default(), engine.clone());

        app.toggle_pause();
        assert_eq!(app.state, AppState::Paused);
        engine.update(&KeyEvent::press('a', 0.0)).unwrap();
        app.refresh();
        assert_eq!(app.snapshot.total_events, 0);
        // Capture kept going underneath
        assert_eq!(engine.total_events(), 1);

        app.toggle_pause();
        app.refresh();
        assert_eq!(app.snapshot.total_events, 1);
    }

    #[test]
    fn reset_clears_engine() {
        let engine = SharedFeatureEngine::default();
        let mut app = App::new(Config::default(), engine.clone());
        engine.update(&KeyEvent::press('a', 0.0)).unwrap();
        app.refresh();

        app.reset();
        assert_eq!(engine.total_events(), 0);
        assert_eq!(app.snapshot.total_events, 0);
        assert_eq!(app.get_status(), Some("Features reset"));
    }

    #[test]
    fn help_toggles() {
        let mut app = App::default();
        app.toggle_help();
        assert_eq!(app.view, AppView::Help);
        app.toggle_help();
        assert_eq!(app.view, AppView::Features);
    }

    #[test]
    fn quit_sets_state() {
        let mut app = App::default();
        app.quit();
        assert_eq!(app.state, AppState::Quitting);
        assert_eq!(app.state.label(), "QUITTING");
    }
}
