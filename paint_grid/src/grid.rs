//! Grid State — the fixed logical grid over the video frame and the set of
//! painted cells.

use std::collections::HashSet;

/// A quantized `(col, row)` region of the video frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    pub fn new(col: u32, row: u32) -> Self {
        Cell { col, row }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GridGeometry
// ════════════════════════════════════════════════════════════════════════════

/// Frame size and grid resolution.  A square `size × size` grid is laid
/// over the frame, so cells are `width / size` by `height / size` pixels
/// and need not be square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub width:  u32,
    pub height: u32,
    pub size:   u32,
}

impl GridGeometry {
    /// Callers are expected to hand in a validated config (all non-zero).
    pub fn new(width: u32, height: u32, size: u32) -> Self {
        GridGeometry { width, height, size }
    }

    pub fn cell_width(&self) -> f32 {
        self.width as f32 / self.size as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.height as f32 / self.size as f32
    }

    /// True when `(x, y)` lies in `[0, width) × [0, height)`.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Quantize a pixel position to its cell.
    ///
    /// Positions outside the frame (including NaN) are clamped onto the
    /// nearest edge cell, so the result is always a valid grid cell.
    pub fn cell_of(&self, x: f32, y: f32) -> Cell {
        Cell {
            col: self.quantize(x, self.cell_width()),
            row: self.quantize(y, self.cell_height()),
        }
    }

    fn quantize(&self, v: f32, step: f32) -> u32 {
        let last = self.size.saturating_sub(1) as i64;
        ((v / step).floor() as i64).clamp(0, last) as u32
    }

    /// Pixel rectangle `(x, y, w, h)` covered by `cell`.
    pub fn cell_rect(&self, cell: Cell) -> (f32, f32, f32, f32) {
        let (w, h) = (self.cell_width(), self.cell_height());
        (cell.col as f32 * w, cell.row as f32 * h, w, h)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col < self.size && cell.row < self.size
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GridState — the Filled Set
// ════════════════════════════════════════════════════════════════════════════

/// The set of currently painted cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridState {
    filled: HashSet<Cell>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.filled.contains(&cell)
    }

    /// Returns `true` if the cell was not filled before.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.filled.insert(cell)
    }

    /// Returns `true` if the cell was filled before.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.filled.remove(&cell)
    }

    pub fn clear(&mut self) {
        self.filled.clear();
    }

    pub fn len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    /// Every filled cell, in no particular order.  Each call starts a
    /// fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.filled.iter().copied()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn vga() -> GridGeometry {
        GridGeometry::new(640, 480, 64)
    }

    #[test]
    fn cell_size_for_vga() {
        let g = vga();
        assert_eq!(g.cell_width(), 10.0);
        assert_eq!(g.cell_height(), 7.5);
    }

    #[test]
    fn cell_of_reference_point() {
        assert_eq!(vga().cell_of(100.0, 100.0), Cell::new(10, 13));
    }

    #[test]
    fn cell_of_in_frame_is_in_range() {
        let g = vga();
        let mut y = 0.0;
        while y < 480.0 {
            let mut x = 0.0;
            while x < 640.0 {
                let c = g.cell_of(x, y);
                assert!(g.in_bounds(c), "({}, {}) → {:?}", x, y, c);
                assert_eq!(c, g.cell_of(x, y));
                x += 3.7;
            }
            y += 2.9;
        }
        assert_eq!(g.cell_of(639.99, 479.99), Cell::new(63, 63));
    }

    #[test]
    fn cell_of_clamps_outside_frame() {
        let g = vga();
        assert_eq!(g.cell_of(700.0, 500.0), Cell::new(63, 63));
        assert_eq!(g.cell_of(640.0, 480.0), Cell::new(63, 63));
        assert_eq!(g.cell_of(-5.0, -0.1), Cell::new(0, 0));
        assert_eq!(g.cell_of(f32::NAN, 20.0), Cell::new(0, 2));
        assert_eq!(g.cell_of(f32::INFINITY, f32::NEG_INFINITY), Cell::new(63, 0));
    }

    #[test]
    fn contains_point_is_half_open() {
        let g = vga();
        assert!(g.contains_point(0.0, 0.0));
        assert!(g.contains_point(639.5, 479.5));
        assert!(!g.contains_point(640.0, 10.0));
        assert!(!g.contains_point(10.0, -1.0));
    }

    #[test]
    fn cell_rect_matches_quantization() {
        let g = vga();
        let (x, y, w, h) = g.cell_rect(Cell::new(10, 13));
        assert_eq!((x, y, w, h), (100.0, 97.5, 10.0, 7.5));
        assert_eq!(g.cell_of(x + w / 2.0, y + h / 2.0), Cell::new(10, 13));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut once = GridState::new();
        once.insert(Cell::new(1, 2));
        let mut twice = GridState::new();
        assert!(twice.insert(Cell::new(1, 2)));
        assert!(!twice.insert(Cell::new(1, 2)));
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut g = GridState::new();
        g.insert(Cell::new(3, 3));
        let before = g.clone();
        assert!(!g.remove(Cell::new(4, 4)));
        assert_eq!(g, before);
        assert!(g.remove(Cell::new(3, 3)));
        assert!(g.is_empty());
    }

    #[test]
    fn iter_restarts_every_call() {
        let mut g = GridState::new();
        for i in 0..5 { g.insert(Cell::new(i, i)); }
        assert_eq!(g.iter().count(), 5);
        assert_eq!(g.iter().count(), 5);
        let mut cells: Vec<Cell> = g.iter().collect();
        cells.sort();
        assert_eq!(cells[0], Cell::new(0, 0));
    }

    #[test]
    fn clear_empties() {
        let mut g = GridState::new();
        g.insert(Cell::new(0, 1));
        g.insert(Cell::new(2, 3));
        g.clear();
        assert!(g.is_empty());
        assert!(!g.contains(Cell::new(0, 1)));
    }
}
