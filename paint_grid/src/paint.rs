//! Paint Controller — applies one tick's gesture signal to the grid.

use std::fmt;

use log::debug;

use crate::gesture::GestureSignal;
use crate::grid::{Cell, GridGeometry, GridState};

/// Whether an active pointer adds or removes cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Draw,
    Erase,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Draw  => write!(f, "Draw"),
            Mode::Erase => write!(f, "Erase"),
        }
    }
}

/// What a single [`apply`] did to the Filled Set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The signal was inactive; nothing was looked at.
    Idle,
    /// Draw mode, and the cell was newly filled.
    Filled(Cell),
    /// Erase mode, and the cell was filled until now.
    Erased(Cell),
    /// Pointer active but the set already agreed with the mode.
    Unchanged(Cell),
}

impl PaintOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, PaintOutcome::Filled(_) | PaintOutcome::Erased(_))
    }
}

/// Apply `signal` to `grid` under `mode`.
///
/// Off-frame positions are clamped onto the edge cells by
/// [`GridGeometry::cell_of`]; both insert and remove are idempotent.
pub fn apply(
    signal:   GestureSignal,
    mode:     Mode,
    grid:     &mut GridState,
    geometry: &GridGeometry,
) -> PaintOutcome {
    let (x, y) = match signal {
        GestureSignal::Active { x, y } => (x, y),
        GestureSignal::Inactive        => return PaintOutcome::Idle,
    };

    if !geometry.contains_point(x, y) {
        debug!("pointer ({:.1}, {:.1}) outside frame, clamping", x, y);
    }
    let cell = geometry.cell_of(x, y);

    let outcome = match mode {
        Mode::Draw  if grid.insert(cell) => PaintOutcome::Filled(cell),
        Mode::Erase if grid.remove(cell) => PaintOutcome::Erased(cell),
        _ => PaintOutcome::Unchanged(cell),
    };
    if outcome.changed() {
        debug!("{:?} ({} filled)", outcome, grid.len());
    }
    outcome
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
