//! Configuration: frame size, grid resolution, gesture threshold, detector
//! options and display flags.
//!
//! Every section has defaults matching the classic 640×480 webcam setup,
//! so an empty TOML document is a valid configuration:
//!
//! ```toml
//! [frame]
//! width  = 640
//! height = 480
//!
//! [grid]
//! size = 64
//!
//! [gesture]
//! pointer   = 8
//! threshold = 40.0
//!
//! [detector]
//! flip_horizontal      = false
//! detection_confidence = 0.8
//! score_threshold      = 0.75
//! iou_threshold        = 0.3
//! # max_continuous_checks = 10   (absent = unlimited)
//!
//! [display]
//! mirror = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaintError, Result};
use crate::gesture::DEFAULT_THRESHOLD;
use crate::grid::GridGeometry;
use crate::landmark::index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width:  u32,
    pub height: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig { width: 640, height: 480 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells per side of the square grid.
    pub size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { size: 64 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Landmark whose tip acts as the pointer.
    pub pointer:   usize,
    /// Minimum `yBase - yTip` (pixels) for the finger to count as raised.
    pub threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            pointer:   index::INDEX_FINGER_TIP,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Options handed to the landmark source when it starts.  The painting
/// core never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub flip_horizontal:       bool,
    /// `None` means check continuously forever.
    pub max_continuous_checks: Option<u32>,
    pub detection_confidence:  f32,
    pub score_threshold:       f32,
    pub iou_threshold:         f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        DetectorOptions {
            flip_horizontal:       false,
            max_continuous_checks: None,
            detection_confidence:  0.8,
            score_threshold:       0.75,
            iou_threshold:         0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the frame flipped left/right, like a mirror.
    pub mirror: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { mirror: true }
    }
}

impl DisplayConfig {
    /// Map a video x to a screen x (or back; the flip is its own inverse).
    pub fn flip_x(&self, x: f32, width: u32) -> f32 {
        if self.mirror { width as f32 - x } else { x }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PaintConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub frame:    FrameConfig,
    pub grid:     GridConfig,
    pub gesture:  GestureConfig,
    pub detector: DetectorOptions,
    pub display:  DisplayConfig,
}

impl PaintConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PaintError::ConfigParse { reason: e.to_string() })
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PaintError::ConfigRead {
            path:   path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(PaintError::invalid_config(format!(
                "frame must be non-empty, got {}x{}", self.frame.width, self.frame.height
            )));
        }
        if self.grid.size == 0 {
            return Err(PaintError::invalid_config("grid size must be at least 1"));
        }
        if !self.gesture.threshold.is_finite() || self.gesture.threshold < 0.0 {
            return Err(PaintError::invalid_config(format!(
                "gesture threshold must be a non-negative number, got {}", self.gesture.threshold
            )));
        }
        if !(4..=20).contains(&self.gesture.pointer) {
            return Err(PaintError::invalid_config(format!(
                "pointer landmark {} must be within 4..=20", self.gesture.pointer
            )));
        }
        let d = &self.detector;
        for (name, v) in [
            ("detection_confidence", d.detection_confidence),
            ("score_threshold",      d.score_threshold),
            ("iou_threshold",        d.iou_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PaintError::invalid_config(format!(
                    "detector {} must be within 0..=1, got {}", name, v
                )));
            }
        }
        Ok(())
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.frame.width, self.frame.height, self.grid.size)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
