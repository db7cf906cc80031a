//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                                          │
//! │   video frame: grid, filled cells,       │
//! │   hand skeleton (mirrored by default)    │
//! │                                          │
//! ├──────────────────────────────────────────┤
//! │ [ERASE] [DRAW] [CLEAR]                   │  button bar
//! ├──────────────────────────────────────────┤
//! │ status line / key legend                 │  status bar
//! └──────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use paint_grid::{DetectionFrame, DisplayConfig, Mode, PaintError, Session, Surface};

use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const BAR_H:           usize = 40;
const STATUS_H:        usize = 36;
const BUTTON_W:        usize = 60;
const BUTTON_H:        usize = 20;
const BG_COLOR:        u32   = 0xFF1A1A2E;
const BAR_BG:          u32   = 0xFF16213E;
const TEXT_BG:         u32   = 0xFF0F3460;
const BUTTON_COLOR:    u32   = 0xFF3A3A5A;
const ACTIVE_COLOR:    u32   = 0xFFFFD700;  // gold

/// Commands the window hands to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    SetMode(Mode),
    Clear,
    Quit,
}

/// An on-screen button below the video frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub label:   &'static str,
    pub x:       usize,
    pub y:       usize,
    pub command: UiCommand,
}

impl Button {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32 && x < (self.x + BUTTON_W) as f32
            && y >= self.y as f32 && y < (self.y + BUTTON_H) as f32
    }
}

/// ERASE, DRAW and CLEAR, laid out 10 px under the frame.
pub fn buttons(frame_height: usize) -> [Button; 3] {
    let y = frame_height + 10;
    [
        Button { label: "ERASE", x: 10,  y, command: UiCommand::SetMode(Mode::Erase) },
        Button { label: "DRAW",  x: 80,  y, command: UiCommand::SetMode(Mode::Draw)  },
        Button { label: "CLEAR", x: 150, y, command: UiCommand::Clear },
    ]
}

/// The command of the button under window position `(x, y)`, if any.
pub fn button_at(x: f32, y: f32, frame_height: usize) -> Option<UiCommand> {
    buttons(frame_height)
        .iter()
        .find(|b| b.contains(x, y))
        .map(|b| b.command)
}

// ════════════════════════════════════════════════════════════════════════════
// FrameBuffer — the drawing surface behind the window
// ════════════════════════════════════════════════════════════════════════════

/// ARGB pixel buffer for the whole window.  As a [`Surface`] it draws in
/// video coordinates, clipped to the frame area and mirrored when the
/// display asks for it.
pub struct FrameBuffer {
    pub buf:          Vec<u32>,
    pub width:        usize,
    pub height:       usize,
    pub frame_height: usize,
    display:          DisplayConfig,
}

impl FrameBuffer {
    pub fn new(width: usize, frame_height: usize, display: DisplayConfig) -> Self {
        let height = frame_height + BAR_H + STATUS_H;
        FrameBuffer {
            buf: vec![BG_COLOR; width * height],
            width,
            height,
            frame_height,
            display,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buf[y * self.width + x])
        } else {
            None
        }
    }

    fn to_screen_x(&self, x: f32) -> f32 {
        self.display.flip_x(x, self.width as u32)
    }

    /// Window position → video position (undoes the mirror).
    ///
    /// Both axes snap to the centre of the screen pixel under `(x, y)`, the
    /// same point `fill_rect` tests, so a pointer always lands in the cell
    /// drawn beneath it.
    pub fn to_video(&self, x: f32, y: f32) -> (f32, f32) {
        (self.display.flip_x(x.floor() + 0.5, self.width as u32), y.floor() + 0.5)
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: i64, y: i64, max_y: usize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < max_y {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn fill_box(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(self.width) {
            self.set_pixel(col as i64, y as i64, self.height, color);
            self.set_pixel(col as i64, (y + h - 1) as i64, self.height, color);
        }
        for row in y..(y + h).min(self.height) {
            self.set_pixel(x as i64, row as i64, self.height, color);
            self.set_pixel((x + w - 1) as i64, row as i64, self.height, color);
        }
    }

    /// Filled disc of diameter `d` in screen space, clipped to the frame.
    fn stamp(&mut self, cx: f32, cy: f32, d: f32, color: u32) {
        let max_y = self.frame_height;
        if d <= 1.0 {
            self.set_pixel(cx.floor() as i64, cy.floor() as i64, max_y, color);
            return;
        }
        let r  = d / 2.0;
        let r2 = r * r;
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, max_y, color);
                }
            }
        }
    }

    /// Minimal bitmap font — 3×5 characters for labels.
    /// Each character is encoded as 5 rows × 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as i64, (y + row) as i64, self.height, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > self.width { break; }
        }
    }

    // ── Chrome below the frame ────────────────────────────────────────────

    fn draw_button_bar(&mut self, mode: Mode) {
        self.fill_box(0, self.frame_height, self.width, BAR_H, BAR_BG);
        for b in buttons(self.frame_height) {
            let active = b.command == UiCommand::SetMode(mode);
            self.fill_box(b.x, b.y, BUTTON_W, BUTTON_H, BUTTON_COLOR);
            let border = if active { ACTIVE_COLOR } else { 0xFF888888 };
            self.draw_border(b.x, b.y, BUTTON_W, BUTTON_H, border);
            let lx = b.x + (BUTTON_W.saturating_sub(b.label.len() * 4)) / 2;
            self.draw_label(b.label, lx, b.y + BUTTON_H / 2 - 2, 0xFFEEEEEE);
        }
    }

    fn draw_status(&mut self, status: &str) {
        let y = self.frame_height + BAR_H;
        self.fill_box(0, y, self.width, STATUS_H, TEXT_BG);
        self.draw_label(status, 10, y + 8, 0xFFEEEEEE);
        self.draw_label(
            "mouse=point  hold button/space=finger up  e=erase  d=draw  c=clear  q=quit",
            10, y + STATUS_H - 12, 0xFF888888,
        );
    }
}

impl Surface for FrameBuffer {
    fn clear(&mut self) {
        let end = self.frame_height * self.width;
        self.buf[..end].fill(BG_COLOR);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: u32) {
        let (x0, y0) = (self.to_screen_x(from.0), from.1);
        let (x1, y1) = (self.to_screen_x(to.0), to.1);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, weight, color);
        }
    }

    // A pixel is covered when its centre, mapped back to video space, falls
    // in `[x, x + w) × [y, y + h)`.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        let (a, b) = (self.to_screen_x(x), self.to_screen_x(x + w));
        let (sx0, sx1) = (a.min(b).floor() as i64 - 1, a.max(b).ceil() as i64 + 1);
        let (sy0, sy1) = (y.floor() as i64 - 1, (y + h).ceil() as i64 + 1);
        let max_y = self.frame_height;
        for py in sy0..sy1 {
            for px in sx0..sx1 {
                let (vx, vy) = self.to_video(px as f32, py as f32);
                if vx >= x && vx < x + w && vy >= y && vy < y + h {
                    self.set_pixel(px, py, max_y, color);
                }
            }
        }
    }

    fn point(&mut self, at: (f32, f32), weight: f32, color: u32) {
        let sx = self.to_screen_x(at.0);
        self.stamp(sx, at.1, weight, color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:      Window,
    canvas:      FrameBuffer,
    /// Present only when the simulated landmark source is in use.
    sim_tx:      Option<Sender<SimInput>>,
    last_sent:   Option<(f32, f32)>,
    last_raised: bool,
    mouse_was_down: bool,
}

impl Visualizer {
    pub fn new(
        width:   usize,
        height:  usize,
        display: DisplayConfig,
        sim_tx:  Option<Sender<SimInput>>,
    ) -> Result<Self, PaintError> {
        let canvas = FrameBuffer::new(width, height, display);
        let mut window = Window::new(
            "Hand Paint — raise your index finger to paint",
            canvas.width, canvas.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| PaintError::Window { reason: e.to_string() })?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            canvas,
            sim_tx,
            last_sent:      None,
            last_raised:    false,
            mouse_was_down: false,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    fn send(&self, input: SimInput) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(input);
        }
    }

    /// Poll keyboard and mouse.  Pointer movement goes to the simulated
    /// landmark source; mode/clear/quit come back as [`UiCommand`]s.
    pub fn poll_input(&mut self) -> Vec<UiCommand> {
        let mut cmds = Vec::new();
        if !self.window.is_open() {
            cmds.push(UiCommand::Quit);
            return cmds;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        if one_shot(Key::Q) || one_shot(Key::Escape) {
            cmds.push(UiCommand::Quit);
        }
        if one_shot(Key::E) { cmds.push(UiCommand::SetMode(Mode::Erase)); }
        if one_shot(Key::D) { cmds.push(UiCommand::SetMode(Mode::Draw));  }
        if one_shot(Key::C) { cmds.push(UiCommand::Clear); }

        let down  = self.window.get_mouse_down(MouseButton::Left);
        let space = self.window.is_key_down(Key::Space);
        let pos   = self.window.get_mouse_pos(MouseMode::Discard);

        // Button clicks fire on press
        if down && !self.mouse_was_down {
            if let Some((mx, my)) = pos {
                if let Some(cmd) = button_at(mx, my, self.canvas.frame_height) {
                    cmds.push(cmd);
                }
            }
        }
        self.mouse_was_down = down;

        let in_frame = pos.filter(|&(_, my)| my < self.canvas.frame_height as f32);
        match in_frame {
            Some((mx, my)) => {
                let video = self.canvas.to_video(mx, my);
                if self.last_sent != Some(video) {
                    self.send(SimInput::Pointer { x: video.0, y: video.1 });
                    self.last_sent = Some(video);
                }
                let raised = down || space;
                if raised != self.last_raised {
                    self.send(SimInput::Raise(raised));
                    self.last_raised = raised;
                }
            }
            None => {
                if self.last_sent.take().is_some() {
                    self.send(SimInput::Hide);
                }
            }
        }

        if cmds.contains(&UiCommand::Quit) {
            self.send(SimInput::Quit);
        }
        cmds
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        session: &Session,
        frame:   &DetectionFrame,
        status:  &str,
    ) -> Result<(), PaintError> {
        session.render(frame, &mut self.canvas);
        self.canvas.draw_button_bar(session.mode());
        self.canvas.draw_status(status);

        self.window
            .update_with_buffer(&self.canvas.buf, self.canvas.width, self.canvas.height)
            .map_err(|e| PaintError::Window { reason: e.to_string() })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
