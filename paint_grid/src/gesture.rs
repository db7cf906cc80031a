//! Gesture Interpreter — one frame of landmarks in, one pointer signal out.
//!
//! The test is deliberately simple: the pointer finger counts as "up" when
//! its tip sits more than `threshold` pixels above the landmark four
//! indices below it.  Each frame is judged on its own; there is no
//! hysteresis, so a hand hovering right at the threshold may flicker
//! between active and inactive.

use crate::error::{PaintError, Result};
use crate::landmark::{index, Detection};

/// Default finger-up distance in pixels.
pub const DEFAULT_THRESHOLD: f32 = 40.0;

/// The discrete signal handed to the paint controller each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    /// Pointer raised at this video-pixel position.
    Active { x: f32, y: f32 },
    /// No hand, or the pointer finger is curled.
    Inactive,
}

impl GestureSignal {
    pub fn is_active(&self) -> bool {
        matches!(self, GestureSignal::Active { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInterpreter {
    pointer:   usize,
    threshold: f32,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        GestureInterpreter {
            pointer:   index::INDEX_FINGER_TIP,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl GestureInterpreter {
    /// `pointer` must leave room for its base joint at `pointer - 4`.
    pub fn new(pointer: usize, threshold: f32) -> Result<Self> {
        if !(4..=20).contains(&pointer) {
            return Err(PaintError::invalid_config(format!(
                "pointer landmark {} must be within 4..=20", pointer
            )));
        }
        Ok(GestureInterpreter { pointer, threshold })
    }

    pub fn pointer(&self) -> usize { self.pointer }
    pub fn threshold(&self) -> f32 { self.threshold }

    /// `yBase - yTip > threshold`, with y growing downward.
    pub fn is_finger_up(&self, detection: &Detection) -> bool {
        let tip  = detection.landmarks()[self.pointer];
        let base = detection.landmarks()[self.pointer - 4];
        base.y - tip.y > self.threshold
    }

    /// Judge the first hand of the frame, if there is one.
    pub fn interpret(&self, detection: Option<&Detection>) -> GestureSignal {
        match detection {
            Some(d) if self.is_finger_up(d) => {
                let tip = d.landmarks()[self.pointer];
                GestureSignal::Active { x: tip.x, y: tip.y }
            }
            _ => GestureSignal::Inactive,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::pointing_hand;

    #[test]
    fn lift_41_is_active() {
        let g = GestureInterpreter::default();
        let d = pointing_hand(120.0, 200.0, 41.0);
        assert_eq!(g.interpret(Some(&d)), GestureSignal::Active { x: 120.0, y: 200.0 });
    }

    #[test]
    fn lift_40_is_inactive() {
        let g = GestureInterpreter::default();
        let d = pointing_hand(120.0, 200.0, 40.0);
        assert!(!g.is_finger_up(&d));
        assert_eq!(g.interpret(Some(&d)), GestureSignal::Inactive);
    }

    #[test]
    fn lift_39_is_inactive() {
        let g = GestureInterpreter::default();
        let d = pointing_hand(120.0, 200.0, 39.0);
        assert_eq!(g.interpret(Some(&d)), GestureSignal::Inactive);
    }

    #[test]
    fn tip_below_base_is_inactive() {
        let g = GestureInterpreter::default();
        let d = pointing_hand(50.0, 50.0, -60.0);
        assert!(!g.interpret(Some(&d)).is_active());
    }

    #[test]
    fn no_detection_is_inactive() {
        assert_eq!(GestureInterpreter::default().interpret(None), GestureSignal::Inactive);
    }

    #[test]
    fn custom_threshold() {
        let g = GestureInterpreter::new(8, 10.0).unwrap();
        let d = pointing_hand(0.0, 0.0, 11.0);
        assert!(g.is_finger_up(&d));
    }

    #[test]
    fn pointer_without_base_rejected() {
        assert!(GestureInterpreter::new(3, 40.0).is_err());
        assert!(GestureInterpreter::new(21, 40.0).is_err());
        assert!(GestureInterpreter::new(12, 40.0).is_ok());
    }

    #[test]
    fn judgement_has_no_memory() {
        let g = GestureInterpreter::default();
        let up   = pointing_hand(10.0, 100.0, 80.0);
        let down = pointing_hand(10.0, 100.0, 5.0);
        assert!(g.interpret(Some(&up)).is_active());
        assert!(!g.interpret(Some(&down)).is_active());
        assert!(g.interpret(Some(&up)).is_active());
    }
}
