//! GameView: composes a session snapshot into a screen buffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot, Phase};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen position of field cell (0, 0) and the size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
}

impl FieldLayout {
    /// Screen column/row of field cell (x, y)
    pub fn screen_pos(&self, x: u16, y: u16) -> (u16, u16) {
        (self.origin_x + x * self.cell_w, self.origin_y + y)
    }

    pub fn width(&self) -> u16 {
        FIELD_WIDTH as u16 * self.cell_w
    }
}

const BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the playfield.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the field lands inside `viewport`.
    pub fn layout(&self, viewport: Viewport) -> FieldLayout {
        let field_w = FIELD_WIDTH as u16 * self.cell_w;
        let field_h = FIELD_HEIGHT as u16;
        FieldLayout {
            origin_x: viewport.width.saturating_sub(field_w) / 2,
            origin_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(field_h) / 2,
                AnchorY::Top => 0,
            },
            cell_w: self.cell_w,
        }
    }

    /// Compose the snapshot into an existing buffer.
    ///
    /// Callers can reuse a buffer across frames; it is resized to the
    /// viewport and cleared first.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(viewport);

        // Field cells, border included.
        for (y, row) in snap.field.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                let cell = Cell::from_tag(tag).unwrap_or_default();
                let (ch, style) = cell_glyph(cell);
                self.fill_cell(fb, layout, x as u16, y as u16, ch, style);
            }
        }

        // Active piece, clipped to the field.
        if let Some(active) = snap.active {
            for &(dx, dy) in get_shape(active.kind, active.rotation).iter() {
                let x = active.x as i16 + dx as i16;
                let y = active.y as i16 + dy as i16;
                if x >= 0 && x < FIELD_WIDTH as i16 && y >= 0 && y < FIELD_HEIGHT as i16 {
                    let style = piece_style(active.kind);
                    self.fill_cell(fb, layout, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.phase == Phase::GameOver {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new buffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: FieldLayout,
        x: u16,
        y: u16,
        ch: char,
        style: GlyphStyle,
    ) {
        let (sx, sy) = layout.screen_pos(x, y);
        fb.fill_rect(sx, sy, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: FieldLayout,
    ) {
        let panel_x = layout
            .origin_x
            .saturating_add(layout.width())
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::fg(Rgb::new(200, 200, 200));

        let rows: [(&str, u32); 4] = [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("PIECES", snap.pieces),
            ("SPEED", snap.speed),
        ];
        let mut y = layout.origin_y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_number(panel_x, y.saturating_add(1), v, 8, value);
            y = y.saturating_add(3);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: FieldLayout, text: &str) {
        let mid_y = layout.origin_y.saturating_add(FIELD_HEIGHT as u16 / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .origin_x
            .saturating_add(layout.width().saturating_sub(text_w) / 2);
        let style = GlyphStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Glyph and style used for a field cell.
pub fn cell_glyph(cell: Cell) -> (char, GlyphStyle) {
    match cell {
        Cell::Empty => (
            '·',
            GlyphStyle {
                fg: Rgb::new(90, 90, 100),
                bg: BG,
                bold: false,
                dim: true,
            },
        ),
        Cell::Locked(kind) => ('█', piece_style(kind)),
        Cell::Flash => (
            '=',
            GlyphStyle {
                fg: Rgb::new(255, 255, 255),
                bg: BG,
                bold: true,
                dim: false,
            },
        ),
        border => (border.glyph(), GlyphStyle::fg(Rgb::new(200, 200, 200))),
    }
}

fn piece_style(kind: PieceKind) -> GlyphStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    GlyphStyle {
        fg,
        bg: BG,
        bold: true,
        dim: false,
    }
}
