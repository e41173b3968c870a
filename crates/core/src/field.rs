//! Field module - the bordered playfield grid
//!
//! The field is 14x18 cells including a two-column wall on each side and a
//! two-row floor. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x grows to the right and y grows downwards.
//!
//! Border cells are stamped once by [`Field::initialize`] and are never
//! overwritten afterwards; interior cells are empty, locked, or flashing.

use arrayvec::ArrayVec;
use log::debug;

use crate::pieces::is_occupied;
use crate::types::{
    Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, INTERIOR_HEIGHT, PIECE_SIZE, WALL_COLUMNS,
};

/// Total number of cells on the field
const FIELD_SIZE: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

/// First interior column
const INTERIOR_LEFT: i8 = WALL_COLUMNS as i8;

/// One past the last interior column
const INTERIOR_RIGHT: i8 = (FIELD_WIDTH - WALL_COLUMNS) as i8;

/// Rows of a line-clear band, ascending
pub type LineRows = ArrayVec<i8, 4>;

/// The playfield - flat array storage, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a field with its border stamped and an empty interior
    pub fn new() -> Self {
        let mut field = Self {
            cells: [Cell::Empty; FIELD_SIZE],
        };
        field.initialize();
        field
    }

    /// Stamp the border and clear the interior.
    pub fn initialize(&mut self) {
        let w = FIELD_WIDTH as i8;
        let h = FIELD_HEIGHT as i8;
        for y in 0..h {
            for x in 0..w {
                let interior_column = x > 1 && x < w - 2;
                let cell = if y == h - 1 {
                    if interior_column {
                        Cell::FloorBase
                    } else {
                        Cell::FloorCorner
                    }
                } else if y == h - 2 && interior_column {
                    Cell::FloorTop
                } else if x == 0 {
                    Cell::LeftWall
                } else if x == 1 || x == w - 2 {
                    Cell::InnerWall
                } else if x == w - 1 {
                    Cell::RightWall
                } else {
                    Cell::Empty
                };
                self.cells[(y as usize) * (FIELD_WIDTH as usize) + (x as usize)] = cell;
            }
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        Self::wide_index(x as i16, y as i16)
    }

    /// Index of a cell whose coordinates may lie outside `i8`.
    #[inline(always)]
    fn wide_index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i16 || y < 0 || y >= FIELD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (FIELD_WIDTH as usize) + (x as usize))
    }

    /// Field index of piece cell (px, py) with the anchor at (x, y).
    #[inline(always)]
    fn piece_cell_index(x: i8, y: i8, px: u8, py: u8) -> Option<usize> {
        Self::wide_index(x as i16 + px as i16, y as i16 + py as i16)
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set an interior cell at position (x, y)
    /// Returns false if out of bounds or if (x, y) is part of the border
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if !Self::is_interior(x, y) || cell.is_border() {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) lies inside the walls and above the floor
    pub fn is_interior(x: i8, y: i8) -> bool {
        (INTERIOR_LEFT..INTERIOR_RIGHT).contains(&x) && (0..INTERIOR_HEIGHT as i8).contains(&y)
    }

    /// Check if a position is in bounds and filled (locked, flashing, or border)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.is_empty())
    }

    /// Check whether `kind` turned to `rotation` fits with its anchor at (x, y).
    ///
    /// Only in-bounds cells can collide: parts of the piece hanging above,
    /// below, or beside the field are ignored, which lets pieces spawn and
    /// rotate partially outside the grid.
    pub fn fits(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        for px in 0..PIECE_SIZE {
            for py in 0..PIECE_SIZE {
                if !is_occupied(kind, rotation, px, py) {
                    continue;
                }
                // Vertical bound uses the row, never the column.
                if let Some(idx) = Self::piece_cell_index(x, y, px, py) {
                    if !self.cells[idx].is_empty() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Write every occupied cell of the piece into the field as locked.
    pub fn lock(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        for px in 0..PIECE_SIZE {
            for py in 0..PIECE_SIZE {
                if !is_occupied(kind, rotation, px, py) {
                    continue;
                }
                if let Some(idx) = Self::piece_cell_index(x, y, px, py) {
                    self.cells[idx] = Cell::Locked(kind);
                }
            }
        }
    }

    /// Check if every interior cell of row `y` is filled
    pub fn is_row_complete(&self, y: i8) -> bool {
        if !(0..INTERIOR_HEIGHT as i8).contains(&y) {
            return false;
        }
        (INTERIOR_LEFT..INTERIOR_RIGHT).all(|x| self.is_occupied(x, y))
    }

    /// Complete rows within the 4-row band starting at `anchor_y`.
    ///
    /// Only the rows a just-locked piece could have touched are scanned.
    /// Returned rows are ascending.
    pub fn find_complete_lines(&self, anchor_y: i8) -> LineRows {
        let mut rows = LineRows::new();
        for py in 0..PIECE_SIZE as i8 {
            let y = anchor_y.saturating_add(py);
            if self.is_row_complete(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Overwrite the interior of each row with the flash marker
    pub fn mark_lines_for_clear(&mut self, rows: &[i8]) {
        for &y in rows {
            for x in INTERIOR_LEFT..INTERIOR_RIGHT {
                self.set(x, y, Cell::Flash);
            }
        }
    }

    /// Remove each row in order, shifting the interior above it down by one.
    pub fn collapse(&mut self, rows: &[i8]) {
        let width = FIELD_WIDTH as usize;
        for &row in rows {
            if !(0..INTERIOR_HEIGHT as i8).contains(&row) {
                continue;
            }
            let row = row as usize;
            for x in INTERIOR_LEFT as usize..INTERIOR_RIGHT as usize {
                for y in (1..=row).rev() {
                    self.cells[y * width + x] = self.cells[(y - 1) * width + x];
                }
                self.cells[x] = Cell::Empty;
            }
            debug!("collapsed row {}", row);
        }
    }

    /// Number of filled interior cells
    pub fn occupied_interior_count(&self) -> usize {
        (0..INTERIOR_HEIGHT as i8)
            .map(|y| {
                (INTERIOR_LEFT..INTERIOR_RIGHT)
                    .filter(|&x| self.is_occupied(x, y))
                    .count()
            })
            .sum()
    }

    /// Write the compact cell tags into a row-major grid
    pub fn write_tag_grid(&self, out: &mut [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize]) {
        let width = FIELD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, tag) in row.iter_mut().enumerate() {
                *tag = self.cells[y * width + x].tag();
            }
        }
    }

    /// Fill one interior row, leaving the listed columns empty (for testing)
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in INTERIOR_LEFT..INTERIOR_RIGHT {
            if !holes.contains(&x) {
                self.set(x, y, Cell::Locked(kind));
            }
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-function form of [`Field::fits`]
#[inline]
pub fn fits(kind: PieceKind, rotation: Rotation, x: i8, y: i8, field: &Field) -> bool {
    field.fits(kind, rotation, x, y)
}
