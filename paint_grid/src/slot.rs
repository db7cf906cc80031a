//! Single-slot hand-off between a landmark source thread and the render loop.
//!
//! The source overwrites the slot whenever it has a new frame; the loop
//! reads whatever is there on each tick.  Nothing is ever queued: a frame
//! the loop did not get to is simply replaced.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{PaintError, Result};
use crate::landmark::Detection;

/// What the render loop sees on one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionFrame {
    /// The source has announced that it can deliver detections.
    pub ready:      bool,
    pub detections: Arc<Vec<Detection>>,
}

impl DetectionFrame {
    pub fn new(ready: bool, detections: Vec<Detection>) -> Self {
        DetectionFrame { ready, detections: Arc::new(detections) }
    }

    /// A ready frame with no hands in view.
    pub fn empty() -> Self {
        DetectionFrame::new(true, Vec::new())
    }

    /// The hand that drives painting.  A source that is not ready yet
    /// counts as "no hand".
    pub fn first(&self) -> Option<&Detection> {
        if self.ready { self.detections.first() } else { None }
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[derive(Debug, Default)]
struct SlotState {
    frame: DetectionFrame,
    fault: Option<PaintError>,
}

/// Cloneable handle to the shared latest-detections cell.
#[derive(Clone, Debug, Default)]
pub struct DetectionSlot {
    inner: Arc<Mutex<SlotState>>,
}

impl DetectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave the slot half-written, so a poisoned
    // lock still holds a usable value.
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the current detections.
    pub fn publish(&self, detections: Vec<Detection>) {
        self.lock().frame.detections = Arc::new(detections);
    }

    pub fn mark_ready(&self) {
        self.lock().frame.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.lock().frame.ready
    }

    /// Record a contract violation by the source.  The first fault wins.
    pub fn fail(&self, err: PaintError) {
        let mut state = self.lock();
        if state.fault.is_none() {
            state.fault = Some(err);
        }
    }

    /// The latest frame, or the fault the source recorded.
    pub fn snapshot(&self) -> Result<DetectionFrame> {
        let state = self.lock();
        match &state.fault {
            Some(err) => Err(err.clone()),
            None      => Ok(state.frame.clone()),
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
    use std::thread;

    #[test]
    fn fresh_slot_is_not_ready_and_empty() {
        let slot = DetectionSlot::new();
        let frame = slot.snapshot().unwrap();
        assert!(!frame.ready);
        assert!(frame.is_empty());
        assert!(frame.first().is_none());
    }

    #[test]
    fn not_ready_hides_detections() {
        let slot = DetectionSlot::new();
        slot.publish(vec![pointing_hand(10.0, 10.0, 50.0)]);
        assert!(slot.snapshot().unwrap().first().is_none());
        slot.mark_ready();
        assert!(slot.snapshot().unwrap().first().is_some());
    }

    #[test]
    fn publish_overwrites() {
        let slot = DetectionSlot::new();
        slot.mark_ready();
        slot.publish(vec![pointing_hand(1.0, 1.0, 50.0)]);
        slot.publish(vec![pointing_hand(2.0, 2.0, 50.0), pointing_hand(3.0, 3.0, 50.0)]);
        let frame = slot.snapshot().unwrap();
        assert_eq!(frame.detections.len(), 2);
        assert_eq!(frame.first().unwrap().landmarks()[8].x, 2.0);
        slot.publish(Vec::new());
        assert!(slot.snapshot().unwrap().is_empty());
    }

    #[test]
    fn fault_is_sticky_and_first_wins() {
        let slot = DetectionSlot::new();
        let first = PaintError::MalformedDetection { expected: 21, found: 3 };
        slot.fail(first.clone());
        slot.fail(PaintError::MalformedDetection { expected: 21, found: 9 });
        slot.publish(Vec::new());
        assert_eq!(slot.snapshot(), Err(first));
    }

    #[test]
    fn writer_thread_is_visible_to_reader() {
        let slot = DetectionSlot::new();
        let writer = slot.clone();
        thread::spawn(move || {
            writer.mark_ready();
            writer.publish(vec![pointing_hand(5.0, 6.0, 50.0)]);
        })
        .join()
        .unwrap();
        assert!(slot.is_ready());
        assert_eq!(slot.snapshot().unwrap().detections.len(), 1);
    }
}
