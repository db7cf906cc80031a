//! Hand landmarks as delivered by a landmark source.
//!
//! A [`Detection`] is one hand in one frame: exactly [`LANDMARK_COUNT`]
//! points in video-pixel space (y grows downward).  The fixed-size array
//! means grid logic never has to ask whether index 8 exists; collaborators
//! that hand over raw point lists go through [`Detection::from_points`],
//! which is the one place a short or long hand is rejected.

use crate::error::{PaintError, Result};

/// Points in the standard hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// Named landmark indices of the 21-point hand skeleton.
pub mod index {
    pub const WRIST:             usize = 0;
    pub const THUMB_CMC:         usize = 1;
    pub const THUMB_MCP:         usize = 2;
    pub const THUMB_IP:          usize = 3;
    pub const THUMB_TIP:         usize = 4;
    pub const INDEX_FINGER_MCP:  usize = 5;
    pub const INDEX_FINGER_PIP:  usize = 6;
    pub const INDEX_FINGER_DIP:  usize = 7;
    pub const INDEX_FINGER_TIP:  usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP:   usize = 13;
    pub const RING_FINGER_PIP:   usize = 14;
    pub const RING_FINGER_DIP:   usize = 15;
    pub const RING_FINGER_TIP:   usize = 16;
    pub const PINKY_MCP:         usize = 17;
    pub const PINKY_PIP:         usize = 18;
    pub const PINKY_DIP:         usize = 19;
    pub const PINKY_TIP:         usize = 20;
}

/// Polylines of the skeleton: palm outline, then each digit from its root.
pub const BONE_CHAINS: [&[usize]; 6] = [
    &[0, 5, 9, 13, 17, 0],
    &[0, 1, 2, 3, 4],
    &[5, 6, 7, 8],
    &[9, 10, 11, 12],
    &[13, 14, 15, 16],
    &[17, 18, 19, 20],
];

/// Joint marker groups as `(start..end, hue°)`: wrist, then one per digit.
pub const JOINT_GROUPS: [(usize, usize, f32); 6] = [
    (0,  1,  0.0),
    (1,  5,  60.0),
    (5,  9,  120.0),
    (9,  13, 180.0),
    (13, 17, 240.0),
    (17, 21, 300.0),
];

/// One tracked keypoint in video-pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Depth; only skeleton rendering may care, painting never does.
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    pub fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// One hand's full set of landmarks in a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Detection {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Detection { landmarks }
    }

    /// Decode a collaborator's raw `[x, y, z]` list.
    ///
    /// Anything other than exactly 21 points is a contract violation of
    /// the source and is reported as [`PaintError::MalformedDetection`].
    pub fn from_points(points: &[[f32; 3]]) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(PaintError::MalformedDetection {
                expected: LANDMARK_COUNT,
                found:    points.len(),
            });
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, p) in landmarks.iter_mut().zip(points) {
            *slot = Landmark::new(p[0], p[1], p[2]);
        }
        Ok(Detection { landmarks })
    }

    pub fn landmark(&self, i: usize) -> Option<&Landmark> {
        self.landmarks.get(i)
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

/// Synthesize a right hand pointing up with its index fingertip at
/// `(tip_x, tip_y)`.
///
/// `lift` is the vertical distance from the thumb tip (landmark 4) up to
/// the index tip (landmark 8), i.e. exactly the quantity the finger-up
/// test compares against its threshold.  Middle, ring and pinky are
/// curled into the palm.  Used by the simulated landmark source and the
/// terminal driver.
pub fn pointing_hand(tip_x: f32, tip_y: f32, lift: f32) -> Detection {
    let base_y = tip_y + lift;
    let wrist  = (tip_x + 10.0, base_y + 80.0);
    let lerp   = |a: (f32, f32), b: (f32, f32), t: f32| {
        (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
    };

    let mut pts: Vec<(f32, f32)> = Vec::with_capacity(LANDMARK_COUNT);
    pts.push(wrist);

    // Thumb: cmc → tip fanned out to the left of the index finger
    pts.push((tip_x - 5.0,  base_y + 60.0));
    pts.push((tip_x - 20.0, base_y + 40.0));
    pts.push((tip_x - 32.0, base_y + 20.0));
    pts.push((tip_x - 40.0, base_y));

    // Index: straight line from the knuckle up to the tip
    let mcp = (tip_x, base_y + 30.0);
    let tip = (tip_x, tip_y);
    pts.push(mcp);
    pts.push(lerp(mcp, tip, 1.0 / 3.0));
    pts.push(lerp(mcp, tip, 2.0 / 3.0));
    pts.push(tip);

    // Middle, ring, pinky: folded back toward the palm
    for k in 1..=3 {
        let x = tip_x + 15.0 * k as f32;
        pts.push((x, base_y + 32.0));
        pts.push((x, base_y + 15.0));
        pts.push((x, base_y + 22.0));
        pts.push((x, base_y + 30.0));
    }

    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
    for (slot, (x, y)) in landmarks.iter_mut().zip(pts) {
        *slot = Landmark::new(x, y, 0.0);
    }
    Detection::new(landmarks)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_accepts_full_hand() {
        let pts: Vec<[f32; 3]> = (0..21).map(|i| [i as f32, 2.0 * i as f32, 0.5]).collect();
        let d = Detection::from_points(&pts).unwrap();
        assert_eq!(d.landmark(8), Some(&Landmark::new(8.0, 16.0, 0.5)));
        assert_eq!(d.landmark(21), None);
    }

    #[test]
    fn from_points_rejects_short_hand() {
        let pts = vec![[0.0; 3]; 20];
        assert_eq!(
            Detection::from_points(&pts),
            Err(PaintError::MalformedDetection { expected: 21, found: 20 })
        );
    }

    #[test]
    fn from_points_rejects_long_hand() {
        let pts = vec![[0.0; 3]; 22];
        assert!(matches!(
            Detection::from_points(&pts),
            Err(PaintError::MalformedDetection { found: 22, .. })
        ));
    }

    #[test]
    fn pointing_hand_places_tip_and_thumb() {
        let d = pointing_hand(100.0, 100.0, 41.0);
        let tip   = d.landmark(index::INDEX_FINGER_TIP).unwrap();
        let thumb = d.landmark(index::THUMB_TIP).unwrap();
        assert_eq!(tip.xy(), (100.0, 100.0));
        assert_eq!(thumb.y - tip.y, 41.0);
    }

    #[test]
    fn bone_chains_stay_in_skeleton() {
        for chain in BONE_CHAINS {
            assert!(chain.len() >= 2);
            assert!(chain.iter().all(|&i| i < LANDMARK_COUNT));
        }
    }

    #[test]
    fn joint_groups_cover_every_landmark_once() {
        let covered: usize = JOINT_GROUPS.iter().map(|(s, e, _)| e - s).sum();
        assert_eq!(covered, LANDMARK_COUNT);
        assert_eq!(JOINT_GROUPS[0].0, 0);
        assert_eq!(JOINT_GROUPS[5].1, LANDMARK_COUNT);
    }
}
