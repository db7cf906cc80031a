//! # paint_grid
//!
//! The painting core behind `hand_paint`: a fixed grid over a video frame,
//! a finger-up gesture test on hand landmarks, and the draw/erase state
//! machine that fills or clears grid cells.
//!
//! Hand detection and pixel output stay outside: landmarks arrive through
//! a [`DetectionSlot`], drawing leaves through the [`Surface`] trait.
//!
//! ## Per-tick data flow
//!
//! ```text
//! DetectionSlot ─snapshot─▶ GestureInterpreter ─signal─▶ paint::apply ─▶ GridState
//!                                                                          │
//!                                               Surface ◀── render_frame ──┘
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use paint_grid::{Cell, DetectionFrame, Mode, PaintConfig, Session, pointing_hand};
//!
//! let mut session = Session::new(&PaintConfig::default()).unwrap();
//! let frame = DetectionFrame::new(true, vec![pointing_hand(100.0, 100.0, 60.0)]);
//!
//! session.tick(&frame);
//! assert!(session.grid().contains(Cell::new(10, 13)));
//!
//! session.set_mode(Mode::Erase);
//! session.tick(&frame);
//! assert!(session.grid().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod landmark;
pub mod paint;
pub mod render;
pub mod session;
pub mod slot;

pub use config::{DetectorOptions, DisplayConfig, PaintConfig};
pub use error::{PaintError, Result};
pub use gesture::{GestureInterpreter, GestureSignal};
pub use grid::{Cell, GridGeometry, GridState};
pub use landmark::{pointing_hand, Detection, Landmark, LANDMARK_COUNT};
pub use paint::{Mode, PaintOutcome};
pub use render::{render_frame, CommandLog, DrawCommand, RenderStyle, Surface};
pub use session::{Session, TickReport};
pub use slot::{DetectionFrame, DetectionSlot};
