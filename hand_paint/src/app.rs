//! Top-level application state and frame loop.
//!
//! `AppState` owns the painting [`Session`].  Each frame it applies the
//! window's commands, reads the latest detections from the slot, ticks
//! the session and hands it to the visualizer.

use std::sync::mpsc;

use log::{error, info};
use paint_grid::{DetectionFrame, DetectionSlot, PaintConfig, PaintError, Session, TickReport};

use crate::source::spawn_landmark_source;
#[cfg(not(feature = "leap"))]
use crate::source::{SimInput, SimLandmarkSource};
use crate::visualizer::{UiCommand, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session: Session,
    quit:    bool,
}

impl AppState {
    pub fn new(cfg: &PaintConfig) -> Result<Self, PaintError> {
        Ok(AppState {
            session: Session::new(cfg)?,
            quit:    false,
        })
    }

    // ── process one UiCommand ─────────────────────────────────────────────

    pub fn handle_command(&mut self, cmd: UiCommand) {
        match cmd {
            UiCommand::SetMode(mode) => self.session.set_mode(mode),
            UiCommand::Clear         => self.session.clear(),
            UiCommand::Quit          => self.quit = true,
        }
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self, frame: &DetectionFrame) -> TickReport {
        self.session.tick(frame)
    }

    /// Read the slot and tick on what is there.  A fault recorded by the
    /// source is returned instead.
    pub fn step(&mut self, slot: &DetectionSlot) -> Result<DetectionFrame, PaintError> {
        let frame = slot.snapshot()?;
        self.tick(&frame);
        Ok(frame)
    }

    pub fn session(&self) -> &Session { &self.session }
    pub fn should_quit(&self) -> bool { self.quit }
    pub fn status(&self) -> String { self.session.status() }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer and the landmark source (simulation by default,
/// hardware with `--features leap`) and drives the input/tick/render loop
/// at ~60 fps until the window closes or the user quits.  A malformed
/// detection from the source ends the loop with that error.
pub fn run(cfg: PaintConfig) -> Result<(), PaintError> {
    let mut app = AppState::new(&cfg)?;
    let slot = DetectionSlot::new();

    // ── Landmark source ───────────────────────────────────────────────────
    #[cfg(not(feature = "leap"))]
    let sim_tx = {
        let (tx, rx) = mpsc::channel::<SimInput>();
        let source = SimLandmarkSource::new(rx, cfg.detector, cfg.gesture.threshold);
        spawn_landmark_source(source, slot.clone());
        Some(tx)
    };

    #[cfg(feature = "leap")]
    let sim_tx: Option<mpsc::Sender<crate::source::SimInput>> = {
        use crate::source::{LeapLandmarkSource, LeapProjection};
        let source = LeapLandmarkSource {
            projection: LeapProjection::new(cfg.frame.width, cfg.frame.height),
            options:    cfg.detector,
        };
        spawn_landmark_source(source, slot.clone());
        None
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(
        cfg.frame.width as usize,
        cfg.frame.height as usize,
        cfg.display,
        sim_tx,
    )?;
    info!("window open: {}x{} frame", cfg.frame.width, cfg.frame.height);

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Window input → commands
        for cmd in vis.poll_input() {
            app.handle_command(cmd);
        }
        if app.should_quit() { break; }

        // 2. Paint with whatever the source last published
        let frame = app.step(&slot).map_err(|e| {
            error!("landmark source failed: {}", e);
            e
        })?;

        // 3. Draw
        vis.render(app.session(), &frame, &app.status())?;
    }

    info!("closing with {} filled cells", app.session().grid().len());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use paint_grid::{pointing_hand, Cell, Mode, PaintOutcome};

    fn make_app() -> AppState {
        AppState::new(&PaintConfig::default()).unwrap()
    }

    fn raised_at(x: f32, y: f32) -> DetectionFrame {
        DetectionFrame::new(true, vec![pointing_hand(x, y, 60.0)])
    }

    #[test]
    fn erase_button_switches_mode() {
        let mut app = make_app();
        app.handle_command(UiCommand::SetMode(Mode::Erase));
        assert_eq!(app.session().mode(), Mode::Erase);
        app.handle_command(UiCommand::SetMode(Mode::Draw));
        assert_eq!(app.session().mode(), Mode::Draw);
    }

    #[test]
    fn tick_paints_under_fingertip() {
        let mut app = make_app();
        let report = app.tick(&raised_at(100.0, 100.0));
        assert_eq!(report.outcome, PaintOutcome::Filled(Cell::new(10, 13)));
    }

    #[test]
    fn clear_command_empties_grid() {
        let mut app = make_app();
        app.tick(&raised_at(100.0, 100.0));
        app.tick(&raised_at(300.0, 100.0));
        app.handle_command(UiCommand::Clear);
        assert!(app.session().grid().is_empty());
    }

    #[test]
    fn quit_command_sets_flag() {
        let mut app = make_app();
        assert!(!app.should_quit());
        app.handle_command(UiCommand::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn step_reads_latest_published_hand() {
        let mut app = make_app();
        let slot = DetectionSlot::new();
        slot.mark_ready();
        slot.publish(vec![pointing_hand(5.0, 5.0, 60.0)]);
        slot.publish(vec![pointing_hand(100.0, 100.0, 60.0)]);
        app.step(&slot).unwrap();
        assert_eq!(app.session().grid().len(), 1);
        assert!(app.session().grid().contains(Cell::new(10, 13)));
    }

    #[test]
    fn step_fails_fast_on_source_fault() {
        let mut app = make_app();
        let slot = DetectionSlot::new();
        slot.mark_ready();
        slot.publish(vec![pointing_hand(100.0, 100.0, 60.0)]);
        slot.fail(PaintError::MalformedDetection { expected: 21, found: 5 });
        assert_eq!(
            app.step(&slot),
            Err(PaintError::MalformedDetection { expected: 21, found: 5 })
        );
        assert!(app.session().grid().is_empty());
    }

    #[test]
    fn status_tracks_source_readiness() {
        let mut app = make_app();
        app.tick(&DetectionFrame::default());
        assert_eq!(app.status(), "Loading model...");
        app.tick(&DetectionFrame::empty());
        assert!(app.status().starts_with("Model Loaded"));
    }
}
