//! Landmark sources — LeapMotion hardware or mouse/keyboard simulation.
//!
//! A source runs on its own thread and publishes the latest hands into a
//! [`DetectionSlot`].  The render loop never waits on it: it reads whatever
//! is in the slot on each tick, so a slow or absent source just means
//! "no hand this frame".

use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
#[cfg(feature = "leap")]
use std::time::Duration;

use log::{debug, info};
use paint_grid::{pointing_hand, DetectionSlot, DetectorOptions};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can publish hand detections into a slot.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, slot: DetectionSlot);
}

/// Spawn a landmark source on its own thread, publishing into `slot`.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S, slot: DetectionSlot) -> JoinHandle<()> {
    thread::spawn(move || Box::new(source).run(slot))
}

fn log_detector_options(options: &DetectorOptions) {
    let checks = options
        .max_continuous_checks
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
    info!(
        "detector options: flip_horizontal={} max_continuous_checks={} \
         detection_confidence={} score_threshold={} iou_threshold={}",
        options.flip_horizontal, checks,
        options.detection_confidence, options.score_threshold, options.iou_threshold,
    );
}

/// Counts device polls against `max_continuous_checks`.  Failed polls
/// count too, so a device that keeps erroring still runs out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckBudget {
    limit: Option<u32>,
    used:  u32,
}

impl CheckBudget {
    pub fn new(limit: Option<u32>) -> Self {
        CheckBudget { limit, used: 0 }
    }

    /// Spend one check; `false` once the limit is reached.
    pub fn take(&mut self) -> bool {
        if self.limit.is_some_and(|limit| self.used >= limit) {
            return false;
        }
        self.used = self.used.saturating_add(1);
        true
    }

    pub fn used(&self) -> u32 { self.used }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapProjection — millimetres above the controller → video pixels
// ════════════════════════════════════════════════════════════════════════════

/// Linear map from the LeapMotion interaction box onto the video frame.
///
/// Leap y grows upward from the device; video y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeapProjection {
    pub width:  f32,
    pub height: f32,
    /// Horizontal span (mm) centred on the device.
    pub span_x: f32,
    /// Lowest and highest tracked height (mm).
    pub min_y:  f32,
    pub max_y:  f32,
}

impl LeapProjection {
    pub fn new(width: u32, height: u32) -> Self {
        LeapProjection {
            width:  width as f32,
            height: height as f32,
            span_x: 400.0,
            min_y:  80.0,
            max_y:  400.0,
        }
    }

    /// `[x, y, z]` in video pixels; z is passed through in millimetres.
    pub fn project(&self, x: f32, y: f32, z: f32) -> [f32; 3] {
        let px = (x / self.span_x + 0.5) * self.width;
        let py = (1.0 - (y - self.min_y) / (self.max_y - self.min_y)) * self.height;
        [px, py, z]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Each tracked hand becomes one 21-point detection: wrist, then four
/// joints per digit from the knuckle out to the tip.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource {
    pub projection: LeapProjection,
    pub options:    DetectorOptions,
}

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, slot: DetectionSlot) {
        use leaprs::*;
        use log::{error, warn};
        use paint_grid::Detection;

        log_detector_options(&self.options);

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                warn!("LeapC connection unavailable ({:?}); no hands will be tracked", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            warn!("LeapMotion device unavailable ({:?}); no hands will be tracked", e);
            return;
        }
        slot.mark_ready();
        info!("LeapMotion source ready");

        let mut budget = CheckBudget::new(self.options.max_continuous_checks);
        loop {
            if !budget.take() {
                info!("stopping after {} checks", budget.used());
                return;
            }
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(e) => {
                    debug!("LeapC poll failed: {:?}", e);
                    thread::sleep(Duration::from_millis(100));
                    continue;
                }
            };

            if let Event::Tracking(frame) = msg.event() {
                let mut hands = Vec::new();
                for hand in frame.hands() {
                    let digits: Vec<_> = hand.digits().collect();
                    let mut raw: Vec<[f32; 3]> = Vec::with_capacity(21);

                    if let Some(middle) = digits.get(2) {
                        let w = middle.metacarpal().prev_joint();
                        raw.push(self.projection.project(w.x, w.y, w.z));
                    }
                    for (i, digit) in digits.iter().enumerate() {
                        let joints = if i == 0 {
                            [
                                digit.metacarpal().next_joint(),
                                digit.proximal().next_joint(),
                                digit.intermediate().next_joint(),
                                digit.distal().next_joint(),
                            ]
                        } else {
                            [
                                digit.proximal().prev_joint(),
                                digit.proximal().next_joint(),
                                digit.intermediate().next_joint(),
                                digit.distal().next_joint(),
                            ]
                        };
                        for j in joints {
                            raw.push(self.projection.project(j.x, j.y, j.z));
                        }
                    }

                    if self.options.flip_horizontal {
                        for p in raw.iter_mut() {
                            p[0] = self.projection.width - p[0];
                        }
                    }

                    match Detection::from_points(&raw) {
                        Ok(d)  => hands.push(d),
                        Err(e) => {
                            error!("LeapMotion delivered a malformed hand: {}", e);
                            slot.fail(e);
                            return;
                        }
                    }
                }
                slot.publish(hands);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer moved to this video-pixel position.
    Pointer { x: f32, y: f32 },
    /// Index finger raised (`true`) or curled (`false`).
    Raise(bool),
    /// Pointer left the frame; the hand disappears.
    Hide,
    Quit,
}

/// Landmark source driven by [`SimInput`] events from the visualizer's
/// window.  The mouse position becomes the index fingertip of a
/// synthesized hand.
pub struct SimLandmarkSource {
    pub rx:        Receiver<SimInput>,
    pub options:   DetectorOptions,
    /// Fingertip lift used while raised; must exceed the gesture threshold.
    pub raised:    f32,
    /// Fingertip lift used while curled; must not exceed it.
    pub curled:    f32,
}

impl SimLandmarkSource {
    /// Lifts chosen well clear of `threshold` on either side.
    pub fn new(rx: Receiver<SimInput>, options: DetectorOptions, threshold: f32) -> Self {
        SimLandmarkSource {
            rx,
            options,
            raised: threshold + 20.0,
            curled: (threshold - 20.0).min(threshold * 0.5),
        }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, slot: DetectionSlot) {
        log_detector_options(&self.options);
        slot.mark_ready();
        info!("Model ready! (simulated hand: move the mouse, hold the left button or Space to paint)");

        let mut pointer: Option<(f32, f32)> = None;
        let mut raised = false;

        for input in self.rx.iter() {
            match input {
                SimInput::Pointer { x, y } => pointer = Some((x, y)),
                SimInput::Raise(up) => {
                    if up != raised {
                        debug!("simulated finger {}", if up { "raised" } else { "curled" });
                    }
                    raised = up;
                }
                SimInput::Hide => pointer = None,
                SimInput::Quit => return,
            }

            let hands = match pointer {
                Some((x, y)) => {
                    let lift = if raised { self.raised } else { self.curled };
                    vec![pointing_hand(x, y, lift)]
                }
                None => Vec::new(),
            };
            slot.publish(hands);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use paint_grid::GestureInterpreter;
    use std::sync::mpsc;

    #[test]
    fn check_budget_stops_at_limit() {
        let mut b = CheckBudget::new(Some(3));
        assert!(b.take());
        assert!(b.take());
        assert!(b.take());
        assert!(!b.take());
        assert!(!b.take());
        assert_eq!(b.used(), 3);
    }

    #[test]
    fn check_budget_zero_allows_nothing() {
        let mut b = CheckBudget::new(Some(0));
        assert!(!b.take());
    }

    #[test]
    fn check_budget_unlimited_keeps_going() {
        let mut b = CheckBudget::new(None);
        assert!((0..10_000).all(|_| b.take()));
        assert_eq!(b.used(), 10_000);
    }

    #[test]
    fn projection_maps_box_corners() {
        let p = LeapProjection::new(640, 480);
        assert_eq!(p.project(0.0, 400.0, 5.0), [320.0, 0.0, 5.0]);
        assert_eq!(p.project(-200.0, 80.0, 0.0), [0.0, 480.0, 0.0]);
        assert_eq!(p.project(200.0, 240.0, 0.0), [640.0, 240.0, 0.0]);
    }

    #[test]
    fn projection_flips_vertical_axis() {
        let p = LeapProjection::new(640, 480);
        let high = p.project(0.0, 300.0, 0.0);
        let low  = p.project(0.0, 150.0, 0.0);
        assert!(high[1] < low[1]);
    }

    #[test_log::test]
    fn sim_source_publishes_latest_pointer() {
        let (tx, rx) = mpsc::channel();
        let slot = DetectionSlot::new();
        let handle = spawn_landmark_source(
            SimLandmarkSource::new(rx, DetectorOptions::default(), 40.0),
            slot.clone(),
        );

        tx.send(SimInput::Pointer { x: 100.0, y: 100.0 }).unwrap();
        tx.send(SimInput::Raise(true)).unwrap();
        tx.send(SimInput::Pointer { x: 200.0, y: 150.0 }).unwrap();
        tx.send(SimInput::Quit).unwrap();
        handle.join().unwrap();

        let frame = slot.snapshot().unwrap();
        assert!(frame.ready);
        assert_eq!(frame.detections.len(), 1);
        let tip = frame.first().unwrap().landmarks()[8];
        assert_eq!((tip.x, tip.y), (200.0, 150.0));
        assert!(GestureInterpreter::default().interpret(frame.first()).is_active());
    }

    #[test]
    fn sim_source_curled_finger_is_inactive() {
        let (tx, rx) = mpsc::channel();
        let slot = DetectionSlot::new();
        let handle = spawn_landmark_source(
            SimLandmarkSource::new(rx, DetectorOptions::default(), 40.0),
            slot.clone(),
        );
        tx.send(SimInput::Pointer { x: 50.0, y: 60.0 }).unwrap();
        tx.send(SimInput::Raise(false)).unwrap();
        tx.send(SimInput::Quit).unwrap();
        handle.join().unwrap();

        let frame = slot.snapshot().unwrap();
        assert!(!GestureInterpreter::default().interpret(frame.first()).is_active());
    }

    #[test]
    fn sim_source_hide_clears_hand() {
        let (tx, rx) = mpsc::channel();
        let slot = DetectionSlot::new();
        let handle = spawn_landmark_source(
            SimLandmarkSource::new(rx, DetectorOptions::default(), 40.0),
            slot.clone(),
        );
        tx.send(SimInput::Pointer { x: 50.0, y: 60.0 }).unwrap();
        tx.send(SimInput::Hide).unwrap();
        drop(tx);
        handle.join().unwrap();

        assert!(slot.snapshot().unwrap().is_empty());
    }

    #[test]
    fn sim_lifts_straddle_threshold() {
        let (_tx, rx) = mpsc::channel();
        let s = SimLandmarkSource::new(rx, DetectorOptions::default(), 40.0);
        assert!(s.raised > 40.0);
        assert!(s.curled <= 40.0);
        let (_tx, rx) = mpsc::channel();
        let s = SimLandmarkSource::new(rx, DetectorOptions::default(), 0.0);
        assert!(s.raised > 0.0);
        assert!(s.curled <= 0.0);
    }
}
