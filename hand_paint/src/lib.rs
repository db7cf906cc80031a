//! # hand_paint
//!
//! Paint on a grid laid over the video frame by raising an index finger;
//! erase after switching mode.  The painting rules live in [`paint_grid`];
//! this crate supplies the landmark sources, the window and the loop.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Mode | Action |
//! |---|---|---|
//! | Index finger raised | Draw | Fill the grid cell under the fingertip |
//! | Index finger raised | Erase | Empty the grid cell under the fingertip |
//! | Index finger curled / no hand | Either | Nothing |
//!
//! The finger counts as raised when its tip is more than the configured
//! threshold (40 px by default) above the thumb tip.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse is the fingertip.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse over frame | Move the simulated fingertip |
//! | Left button / `Space` held | Raise the simulated finger |
//! | `ERASE` button / `E` | Erase mode |
//! | `DRAW` button / `D` | Draw mode |
//! | `CLEAR` button / `C` | Empty the grid |
//! | `Q` / `Escape` | Quit |

pub mod source;
pub mod visualizer;
pub mod app;
