//! Session — the painting context owned by whichever loop drives ticks.
//!
//! Holds the Filled Set, the current mode and the gesture interpreter.
//! One tick is `tick` (interpret the first hand, apply it to the grid)
//! followed by `render` (issue the frame's drawing commands).

use log::info;

use crate::config::PaintConfig;
use crate::error::Result;
use crate::gesture::{GestureInterpreter, GestureSignal};
use crate::grid::{GridGeometry, GridState};
use crate::paint::{self, Mode, PaintOutcome};
use crate::render::{render_frame, RenderStyle, Surface};
use crate::slot::DetectionFrame;

/// Result of one [`Session::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub signal:  GestureSignal,
    pub outcome: PaintOutcome,
}

#[derive(Debug, Clone)]
pub struct Session {
    geometry:    GridGeometry,
    grid:        GridState,
    mode:        Mode,
    interpreter: GestureInterpreter,
    style:       RenderStyle,
    last_signal: GestureSignal,
    ready:       bool,
}

impl Session {
    pub fn new(config: &PaintConfig) -> Result<Self> {
        config.validate()?;
        let interpreter = GestureInterpreter::new(config.gesture.pointer, config.gesture.threshold)?;
        Ok(Session {
            geometry:    config.geometry(),
            grid:        GridState::new(),
            mode:        Mode::Draw,
            interpreter,
            style:       RenderStyle::default(),
            last_signal: GestureSignal::Inactive,
            ready:       false,
        })
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    // ── commands ──────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("mode → {}", mode);
        }
        self.mode = mode;
    }

    /// Empty the Filled Set; mode is left alone.
    pub fn clear(&mut self) {
        info!("clearing {} filled cells", self.grid.len());
        self.grid.clear();
    }

    // ── per-tick ──────────────────────────────────────────────────────────

    pub fn tick(&mut self, frame: &DetectionFrame) -> TickReport {
        if frame.ready && !self.ready {
            info!("landmark source ready");
        }
        self.ready = frame.ready;

        let signal  = self.interpreter.interpret(frame.first());
        let outcome = paint::apply(signal, self.mode, &mut self.grid, &self.geometry);
        self.last_signal = signal;
        TickReport { signal, outcome }
    }

    pub fn render(&self, frame: &DetectionFrame, surface: &mut dyn Surface) {
        render_frame(surface, &self.geometry, &self.grid, &frame.detections, &self.style);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn mode(&self)        -> Mode                { self.mode }
    pub fn grid(&self)        -> &GridState          { &self.grid }
    pub fn geometry(&self)    -> &GridGeometry       { &self.geometry }
    pub fn interpreter(&self) -> &GestureInterpreter { &self.interpreter }
    pub fn last_signal(&self) -> GestureSignal       { self.last_signal }

    pub fn status(&self) -> String {
        if !self.ready {
            return "Loading model...".to_string();
        }
        let pointer = if self.last_signal.is_active() { "finger up" } else { "finger down" };
        format!(
            "Model Loaded  mode={}  filled={}  {}",
            self.mode, self.grid.len(), pointer
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
