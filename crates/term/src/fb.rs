//! Screen buffer: rows of styled glyphs, one `char` per terminal column.
//!
//! The game draws with a small fixed alphabet (`.ABCDEFG=<>!V` plus a few
//! block and dot characters), so a glyph is a single `char` with a style and
//! never spans columns.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const INK: Rgb = Rgb::new(220, 220, 220);
const PAPER: Rgb = Rgb::new(0, 0, 0);

/// Colors and weight of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl GlyphStyle {
    /// Foreground color on the default background.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: PAPER,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self::fg(INK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: GlyphStyle,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: GlyphStyle::fg(INK),
    };
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A `width` x `height` grid of glyphs stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    rows: Vec<Vec<Glyph>>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            rows: vec![vec![Glyph::BLANK; width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Change the size; rows that survive keep their allocation.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.rows.resize_with(height as usize, Vec::new);
        for row in &mut self.rows {
            row.resize(width as usize, Glyph::BLANK);
        }
    }

    /// Glyphs of row `y`, if it exists.
    pub fn row(&self, y: u16) -> Option<&[Glyph]> {
        self.rows.get(y as usize).map(Vec::as_slice)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y)?.get(x as usize).copied()
    }

    /// Writable tail of row `y` starting at column `x`; empty when off-screen.
    fn span_mut(&mut self, x: u16, y: u16) -> &mut [Glyph] {
        match self.rows.get_mut(y as usize) {
            Some(row) if (x as usize) < row.len() => &mut row[x as usize..],
            _ => &mut [],
        }
    }

    /// Off-screen writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(slot) = self.span_mut(x, y).first_mut() {
            *slot = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        for row in &mut self.rows {
            row.fill(glyph);
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: GlyphStyle) {
        self.set(x, y, Glyph { ch, style });
    }

    /// Write `s` left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: GlyphStyle) {
        for (slot, ch) in self.span_mut(x, y).iter_mut().zip(s.chars()) {
            *slot = Glyph { ch, style };
        }
    }

    /// Write `value` right-aligned in a field of `width` columns.
    pub fn put_number(&mut self, x: u16, y: u16, value: u32, width: usize, style: GlyphStyle) {
        self.put_str(x, y, &format!("{:>width$}", value), style);
    }

    /// Fill a `w` x `h` block with one glyph, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: GlyphStyle) {
        let glyph = Glyph { ch, style };
        for dy in 0..h {
            let span = self.span_mut(x, y.saturating_add(dy));
            let n = span.len().min(w as usize);
            span[..n].fill(glyph);
        }
    }

    /// The characters of row `y` as a string (empty when out of range).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| row.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }
}
