//! Game board representation and collision detection

use crate::shape::{BlockColor, Shape};
use serde::Serialize;

/// Default board dimensions
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLUMNS: usize = 10;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Offset of a shape's top-left corner in board coordinates.
/// x grows rightward, y grows downward; y may be negative (above the grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The grid of settled cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    /// Grid stored as [row][col], row 0 is the top
    cells: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Empty; columns]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Empty every cell; dimensions are kept
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
    }

    /// Get the cell at column `x`, row `y`.
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Whether placing `shape` at `pos` hits a wall, the floor, or a settled cell.
    ///
    /// Cells above the top edge (y < 0) never collide. Defined for every
    /// integer position.
    pub fn collides(&self, shape: &Shape, pos: Position) -> bool {
        shape.filled_cells().any(|(dx, dy)| {
            let x = pos.x as i64 + dx as i64;
            let y = pos.y as i64 + dy as i64;
            if x < 0 || x >= self.columns as i64 || y >= self.rows as i64 {
                return true;
            }
            if y < 0 {
                return false;
            }
            self.cells[y as usize][x as usize].is_filled()
        })
    }

    /// Write `color` into every cell covered by `shape` at `pos`.
    ///
    /// The caller checks `collides` first. Cells above the top edge are dropped.
    pub fn merge(&mut self, shape: &Shape, color: BlockColor, pos: Position) {
        for (dx, dy) in shape.filled_cells() {
            let x = pos.x.saturating_add(dx);
            let y = pos.y.saturating_add(dy);
            self.set(x, y, Cell::Filled(color));
        }
    }

    /// Remove every full row and pad the top with empty rows.
    /// Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let kept: Vec<Vec<Cell>> = self
            .cells
            .drain(..)
            .filter(|row| !row.iter().all(Cell::is_filled))
            .collect();
        let cleared = self.rows - kept.len();

        // Fill the top with empty rows
        self.cells = vec![vec![Cell::Empty; self.columns]; cleared];
        self.cells.extend(kept);

        cleared
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn fill_row(board: &mut Board, y: i32, color: BlockColor) {
        for x in 0..board.columns() as i32 {
            board.set(x, y, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(20, 10);
        assert!(board.is_empty());
        assert_eq!(board.rows(), 20);
        assert_eq!(board.columns(), 10);
        assert_eq!(board.iter_rows().count(), 20);
        assert!(board.iter_rows().all(|row| row.len() == 10));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        assert!(board.set(5, 5, Cell::Filled(BlockColor::Red)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(BlockColor::Red)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(0, DEFAULT_ROWS as i32), None);
        assert_eq!(board.get(DEFAULT_COLUMNS as i32, 0), None);
        assert!(!board.set(-1, 0, Cell::Filled(BlockColor::Red)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_reset_keeps_dimensions() {
        let mut board = Board::new(8, 6);
        fill_row(&mut board, 7, BlockColor::Blue);
        board.reset();
        assert!(board.is_empty());
        assert_eq!((board.rows(), board.columns()), (8, 6));
    }

    #[test]
    fn test_collides_in_bounds_empty() {
        let board = Board::default();
        let shape = ShapeKind::T.shape();
        assert!(!board.collides(&shape, Position::new(0, 0)));
        assert!(!board.collides(&shape, Position::new(7, 18)));
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::default();
        let shape = ShapeKind::O.shape();
        assert!(board.collides(&shape, Position::new(-1, 0)));
        assert!(board.collides(&shape, Position::new(9, 0)));
        assert!(board.collides(&shape, Position::new(0, 19)));
        assert!(!board.collides(&shape, Position::new(8, 18)));
    }

    #[test]
    fn test_collides_with_settled_cell() {
        let mut board = Board::default();
        board.set(4, 10, Cell::Filled(BlockColor::Green));
        let shape = ShapeKind::O.shape();
        assert!(board.collides(&shape, Position::new(3, 9)));
        assert!(!board.collides(&shape, Position::new(5, 9)));
    }

    #[test]
    fn test_top_overflow_is_not_a_collision() {
        let board = Board::default();
        let shape = ShapeKind::I.shape().rotated();
        // 3 of 4 cells above the grid
        assert!(!board.collides(&shape, Position::new(0, -3)));
        assert!(!board.collides(&shape, Position::new(0, -100)));
    }

    #[test]
    fn test_collides_is_total() {
        let board = Board::default();
        let shape = ShapeKind::Z.shape();
        assert!(board.collides(&shape, Position::new(i32::MAX, 0)));
        assert!(board.collides(&shape, Position::new(i32::MIN, 0)));
        assert!(board.collides(&shape, Position::new(0, i32::MAX)));
        assert!(!board.collides(&shape, Position::new(0, i32::MIN)));
    }

    #[test]
    fn test_merge_then_collides() {
        let mut board = Board::default();
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let pos = Position::new(3, 17);
            board.reset();
            assert!(!board.collides(&shape, pos));
            board.merge(&shape, kind.color(), pos);
            assert!(board.collides(&shape, pos));
        }
    }

    #[test]
    fn test_merge_writes_color() {
        let mut board = Board::default();
        board.merge(&ShapeKind::S.shape(), BlockColor::Green, Position::new(0, 18));
        // . S S
        // S S .
        assert_eq!(board.get(0, 18), Some(Cell::Empty));
        assert_eq!(board.get(1, 18), Some(Cell::Filled(BlockColor::Green)));
        assert_eq!(board.get(2, 18), Some(Cell::Filled(BlockColor::Green)));
        assert_eq!(board.get(0, 19), Some(Cell::Filled(BlockColor::Green)));
        assert_eq!(board.get(2, 19), Some(Cell::Empty));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::default();
        fill_row(&mut board, 19, BlockColor::Cyan);
        board.set(0, 18, Cell::Filled(BlockColor::Red));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, 1);
        // The block from row 18 should now be on row 19
        assert_eq!(board.get(0, 19), Some(Cell::Filled(BlockColor::Red)));
        assert!(board.get(0, 18).unwrap().is_empty());
        assert_eq!(board.rows(), 20);
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::default();
        fill_row(&mut board, 19, BlockColor::Cyan);
        board.set(3, 18, Cell::Filled(BlockColor::Red));
        fill_row(&mut board, 17, BlockColor::Cyan);
        board.set(5, 16, Cell::Filled(BlockColor::Blue));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, 2);
        assert_eq!(board.iter_rows().count(), 20);
        // Remaining rows keep their order and sink to the bottom
        assert_eq!(board.get(3, 19), Some(Cell::Filled(BlockColor::Red)));
        assert_eq!(board.get(5, 18), Some(Cell::Filled(BlockColor::Blue)));
        assert!(board.iter_rows().take(18).all(|row| row.iter().all(Cell::is_empty)));
    }

    #[test]
    fn test_clear_without_full_rows() {
        let mut board = Board::default();
        board.set(0, 19, Cell::Filled(BlockColor::Red));
        let snapshot = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_clear_whole_board() {
        let mut board = Board::new(4, 6);
        for y in 0..4 {
            fill_row(&mut board, y, BlockColor::Yellow);
        }
        assert_eq!(board.clear_full_rows(), 4);
        assert!(board.is_empty());
        assert_eq!(board.rows(), 4);
    }
}
