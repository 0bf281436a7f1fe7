//! Active falling piece logic

use crate::board::{Board, Position};
use crate::shape::{BlockColor, Shape, ShapeKind};
use serde::Serialize;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// The catalog entry this piece came from
    pub kind: ShapeKind,
    /// Current (possibly rotated) matrix
    pub shape: Shape,
    pub color: BlockColor,
    /// Top-left corner of the matrix on the board
    pub position: Position,
}

impl Piece {
    /// Create a new piece at the spawn position for a board `columns` wide
    pub fn spawn(kind: ShapeKind, columns: usize) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color: kind.color(),
            position: Position::new(columns as i32 / 2 - 1, 0),
        }
    }

    /// Absolute board coordinates (x, y) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(|(dx, dy)| (self.position.x + dx, self.position.y + dy))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.position)
    }

    /// Try to shift sideways by `dx` columns, returns true if successful
    pub fn translate(&mut self, dx: i32, board: &Board) -> bool {
        let original = self.position;
        self.position.x = self.position.x.saturating_add(dx);
        if self.collides(board) {
            self.position = original;
            false
        } else {
            true
        }
    }

    /// Try to move down one row, returns true if successful
    pub fn step_down(&mut self, board: &Board) -> bool {
        self.position.y += 1;
        if self.collides(board) {
            self.position.y -= 1;
            false
        } else {
            true
        }
    }

    /// Try to rotate in place. No kicks: a blocked rotation keeps the old shape.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let candidate = self.shape.rotated();
        if board.collides(&candidate, self.position) {
            return false;
        }
        self.shape = candidate;
        true
    }
}
