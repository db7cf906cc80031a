//! Per-tick drawing commands, issued to whatever surface displays the frame.
//!
//! Order is fixed: clear, grid lines, filled cells, then the skeleton of
//! every detected hand.  All coordinates are video pixels; a surface that
//! mirrors the display does so itself.

use crate::grid::{GridGeometry, GridState};
use crate::landmark::{Detection, BONE_CHAINS, JOINT_GROUPS};

/// Anything that can receive the frame's drawing commands.
pub trait Surface {
    fn clear(&mut self);
    fn line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: u32);
    /// Opaque axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32);
    /// Round marker of diameter `weight`.
    fn point(&mut self, at: (f32, f32), weight: f32, color: u32);
}

/// Colours (packed `0xAARRGGBB`) and stroke weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub grid_color:       u32,
    pub grid_weight:      f32,
    pub cell_color:       u32,
    pub bone_color:       u32,
    pub bone_weight:      f32,
    pub joint_weight:     f32,
    pub joint_saturation: f32,
    pub joint_value:      f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            grid_color:       0xFFC8C8C8,
            grid_weight:      1.0,
            cell_color:       0xFFFFFFFF,
            bone_color:       0xFFFFFFFF,
            bone_weight:      3.0,
            joint_weight:     10.0,
            joint_saturation: 0.4,
            joint_value:      1.0,
        }
    }
}

/// Issue one frame: clear → `size + 1` vertical and `size + 1` horizontal
/// grid lines → one rect per filled cell → bones and joints of every hand.
pub fn render_frame(
    surface:    &mut dyn Surface,
    geometry:   &GridGeometry,
    grid:       &GridState,
    detections: &[Detection],
    style:      &RenderStyle,
) {
    surface.clear();

    let (w, h)   = (geometry.width as f32, geometry.height as f32);
    let (cw, ch) = (geometry.cell_width(), geometry.cell_height());
    for i in 0..=geometry.size {
        let x = i as f32 * cw;
        surface.line((x, 0.0), (x, h), style.grid_weight, style.grid_color);
    }
    for i in 0..=geometry.size {
        let y = i as f32 * ch;
        surface.line((0.0, y), (w, y), style.grid_weight, style.grid_color);
    }

    for cell in grid.iter() {
        let (x, y, cw, ch) = geometry.cell_rect(cell);
        surface.fill_rect(x, y, cw, ch, style.cell_color);
    }

    for hand in detections {
        draw_skeleton(surface, hand, style);
    }
}

fn draw_skeleton(surface: &mut dyn Surface, hand: &Detection, style: &RenderStyle) {
    let lm = hand.landmarks();
    for chain in BONE_CHAINS {
        for pair in chain.windows(2) {
            surface.line(lm[pair[0]].xy(), lm[pair[1]].xy(), style.bone_weight, style.bone_color);
        }
    }
    for &(start, end, hue) in &JOINT_GROUPS {
        let color = hsv_to_argb(hue, style.joint_saturation, style.joint_value);
        for joint in &lm[start..end] {
            surface.point(joint.xy(), style.joint_weight, color);
        }
    }
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h.rem_euclid(360.0);
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0).round() as u32;
    let gi = (g * 255.0).round() as u32;
    let bi = (b * 255.0).round() as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

// ════════════════════════════════════════════════════════════════════════════
// CommandLog — a surface that only remembers what it was asked to draw
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line  { from: (f32, f32), to: (f32, f32), weight: f32, color: u32 },
    Rect  { x: f32, y: f32, w: f32, h: f32, color: u32 },
    Point { at: (f32, f32), weight: f32, color: u32 },
}

#[derive(Clone, Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<DrawCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(lines, rects, points)` issued since the last clear.
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for c in &self.commands {
            match c {
                DrawCommand::Line  { .. } => counts.0 += 1,
                DrawCommand::Rect  { .. } => counts.1 += 1,
                DrawCommand::Point { .. } => counts.2 += 1,
                DrawCommand::Clear        => {}
            }
        }
        counts
    }
}

impl Surface for CommandLog {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }
    fn line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: u32) {
        self.commands.push(DrawCommand::Line { from, to, weight, color });
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }
    fn point(&mut self, at: (f32, f32), weight: f32, color: u32) {
        self.commands.push(DrawCommand::Point { at, weight, color });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::landmark::pointing_hand;

    fn vga() -> GridGeometry {
        GridGeometry::new(640, 480, 64)
    }

    #[test]
    fn empty_grid_draws_only_lines() {
        let mut log = CommandLog::new();
        render_frame(&mut log, &vga(), &GridState::new(), &[], &RenderStyle::default());
        assert_eq!(log.commands[0], DrawCommand::Clear);
        assert_eq!(log.counts(), (130, 0, 0));
    }

    #[test]
    fn vertical_lines_come_before_horizontal() {
        let g = GridGeometry::new(40, 30, 4);
        let mut log = CommandLog::new();
        render_frame(&mut log, &g, &GridState::new(), &[], &RenderStyle::default());
        let lines: Vec<_> = log.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        }).collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], ((0.0, 0.0), (0.0, 30.0)));
        assert_eq!(lines[4], ((40.0, 0.0), (40.0, 30.0)));
        assert_eq!(lines[5], ((0.0, 0.0), (40.0, 0.0)));
        assert_eq!(lines[9], ((0.0, 30.0), (40.0, 30.0)));
    }

    #[test]
    fn filled_cells_follow_grid_lines() {
        let mut grid = GridState::new();
        grid.insert(Cell::new(10, 13));
        grid.insert(Cell::new(0, 0));
        let mut log = CommandLog::new();
        render_frame(&mut log, &vga(), &grid, &[], &RenderStyle::default());
        assert_eq!(log.counts(), (130, 2, 0));
        let first_rect = log.commands.iter()
            .position(|c| matches!(c, DrawCommand::Rect { .. }))
            .unwrap();
        assert_eq!(first_rect, 131);
        assert!(log.commands.contains(&DrawCommand::Rect {
            x: 100.0, y: 97.5, w: 10.0, h: 7.5, color: 0xFFFFFFFF,
        }));
    }

    #[test]
    fn skeleton_drawn_last_for_every_hand() {
        let hands = vec![pointing_hand(100.0, 100.0, 50.0), pointing_hand(300.0, 200.0, 5.0)];
        let mut grid = GridState::new();
        grid.insert(Cell::new(1, 1));
        let mut log = CommandLog::new();
        render_frame(&mut log, &vga(), &grid, &hands, &RenderStyle::default());
        // 21 bones and 21 joints per hand
        assert_eq!(log.counts(), (130 + 42, 1, 42));
        assert!(matches!(log.commands.last(), Some(DrawCommand::Point { .. })));
        let last_rect = log.commands.iter()
            .rposition(|c| matches!(c, DrawCommand::Rect { .. }))
            .unwrap();
        assert_eq!(last_rect, 131);
    }

    #[test]
    fn joint_hues_per_finger() {
        let mut log = CommandLog::new();
        render_frame(&mut log, &GridGeometry::new(10, 10, 1), &GridState::new(),
                     &[pointing_hand(5.0, 5.0, 50.0)], &RenderStyle::default());
        let colors: Vec<u32> = log.commands.iter().filter_map(|c| match c {
            DrawCommand::Point { color, .. } => Some(*color),
            _ => None,
        }).collect();
        assert_eq!(colors.len(), 21);
        assert_eq!(colors[0], hsv_to_argb(0.0, 0.4, 1.0));
        assert_eq!(colors[4], hsv_to_argb(60.0, 0.4, 1.0));
        assert_eq!(colors[8], hsv_to_argb(120.0, 0.4, 1.0));
        assert_eq!(colors[20], hsv_to_argb(300.0, 0.4, 1.0));
        assert_ne!(colors[4], colors[5]);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_argb(0.0,   1.0, 1.0), 0xFFFF0000);
        assert_eq!(hsv_to_argb(120.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(hsv_to_argb(240.0, 1.0, 1.0), 0xFF0000FF);
        assert_eq!(hsv_to_argb(42.0,  0.0, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn clear_resets_log() {
        let mut log = CommandLog::new();
        render_frame(&mut log, &vga(), &GridState::new(), &[], &RenderStyle::default());
        render_frame(&mut log, &vga(), &GridState::new(), &[], &RenderStyle::default());
        assert_eq!(log.counts(), (130, 0, 0));
    }
}
