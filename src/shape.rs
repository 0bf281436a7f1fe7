//! Shape catalog: the 7 piece shapes and their colors
//!
//! Shapes are boolean matrices read top row first. The catalog is fixed;
//! rotating a shape yields a new matrix and never touches the original.

use serde::Serialize;

/// Color identifier stored in settled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

/// The 7 piece types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    I, // long bar
    O, // square
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// Catalog order, used by the spawner
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Get the color paired with this shape
    pub fn color(&self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::Cyan,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::T => BlockColor::Purple,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::J => BlockColor::Blue,
            ShapeKind::S => BlockColor::Green,
            ShapeKind::Z => BlockColor::Red,
        }
    }

    /// Get the spawn matrix for this shape
    pub fn shape(&self) -> Shape {
        // Rows top to bottom, 1 = filled
        let rows: &[&[u8]] = match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            ShapeKind::L => &[&[1, 0, 0], &[1, 1, 1]],
            ShapeKind::J => &[&[0, 0, 1], &[1, 1, 1]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            ShapeKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        };
        Shape {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|&c| c != 0).collect())
                .collect(),
        }
    }
}

/// An occupied-cell pattern, independent of position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    /// Stored as [row][col], row 0 is the top
    cells: Vec<Vec<bool>>,
}

impl Shape {
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Whether the cell at column `dx`, row `dy` is part of the shape
    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        self.cells
            .get(dy)
            .and_then(|row| row.get(dx))
            .copied()
            .unwrap_or(false)
    }

    /// Offsets (dx, dy) of every filled cell, relative to the top-left corner
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }

    /// Transpose, then reverse the row order.
    ///
    /// A `w × h` matrix becomes `h × w`; four applications return the
    /// original matrix.
    pub fn rotated(&self) -> Shape {
        let mut cells: Vec<Vec<bool>> = (0..self.width())
            .map(|col| self.cells.iter().map(|row| row[col]).collect())
            .collect();
        cells.reverse();
        Shape { cells }
    }
}
