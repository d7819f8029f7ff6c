//! Board state: the padded grid, the history stack and the undo budget.
//!
//! The grid is a 1D row-major array of `(size + 2)^2` cells. Row and column
//! `0` and `size + 1` are walls; the playable points are `1..=size` on both
//! axes. Walls are written once at construction and never change.

use std::fmt;

use tracing::trace;

use crate::config::Config;
use crate::constants::{MAX_SIZE, MIN_SIZE, padded_width};
use crate::error::BoardError;

/// A stone color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Contents of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Border sentinel, never playable.
    Wall,
    Empty,
    Stone(Color),
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Stone(c) => Some(c),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Stone(Color::Black) => 'X',
            Cell::Stone(Color::White) => 'O',
            Cell::Empty => '.',
            Cell::Wall => '#',
        }
    }
}

/// A `(row, col)` position in padded coordinates.
pub type Point = (usize, usize);

/// Immutable copy of the grid recorded after a committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    cells: Box<[Cell]>,
    width: usize,
}

impl Snapshot {
    /// Cell at `pt`, or `Wall` outside the buffer.
    pub fn get(&self, pt: Point) -> Cell {
        let (row, col) = pt;
        if row >= self.width || col >= self.width {
            return Cell::Wall;
        }
        self.cells[row * self.width + col]
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// The live board, its move history and the remaining undo requests.
#[derive(Clone, Debug)]
pub struct BoardState {
    size: usize,
    width: usize,
    cells: Vec<Cell>,
    history: Vec<Snapshot>,
    max_steps: usize,
    undo: [u32; 2],
}

impl BoardState {
    /// Create an empty board of side `size` with default rules.
    ///
    /// # Panics
    /// If `size` is outside the supported range.
    pub fn new(size: usize) -> Self {
        Self::with_config(&Config::for_size(size))
    }

    /// Create an empty board from a configuration.
    ///
    /// # Panics
    /// If `config.size` is outside the supported range. Use
    /// [`Config::validate`] to check untrusted configurations first.
    pub fn with_config(config: &Config) -> Self {
        let size = config.size;
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "board size {size} outside {MIN_SIZE}..={MAX_SIZE}"
        );
        let width = padded_width(size);
        let mut cells = vec![Cell::Wall; width * width];
        for row in 1..=size {
            for col in 1..=size {
                cells[row * width + col] = Cell::Empty;
            }
        }
        BoardState {
            size,
            width,
            cells,
            history: Vec::new(),
            max_steps: config.max_steps,
            undo: [config.undo_budget; 2],
        }
    }

    /// Side of the playable area.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side of the padded buffer.
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub(crate) fn idx(&self, pt: Point) -> usize {
        pt.0 * self.width + pt.1
    }

    /// Whether `pt` is a playable point.
    pub fn is_interior(&self, pt: Point) -> bool {
        let (row, col) = pt;
        (1..=self.size).contains(&row) && (1..=self.size).contains(&col)
    }

    /// All playable points, row by row.
    pub fn interior_points(&self) -> impl Iterator<Item = Point> + use<> {
        let size = self.size;
        (1..=size).flat_map(move |row| (1..=size).map(move |col| (row, col)))
    }

    /// Cell at `pt`, or `Wall` outside the buffer.
    pub fn get(&self, pt: Point) -> Cell {
        let (row, col) = pt;
        if row >= self.width || col >= self.width {
            return Cell::Wall;
        }
        self.cells[self.idx(pt)]
    }

    /// The whole padded grid, row-major, for rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write a playable point.
    ///
    /// Positions outside the buffer and wall cells are rejected, as is
    /// writing a wall into the interior.
    pub fn set_cell(&mut self, pt: Point, cell: Cell) -> Result<(), BoardError> {
        let (row, col) = pt;
        if row >= self.width || col >= self.width {
            return Err(BoardError::OutOfBounds(pt));
        }
        if !self.is_interior(pt) || cell == Cell::Wall {
            return Err(BoardError::WallCell(pt));
        }
        let i = self.idx(pt);
        self.cells[i] = cell;
        Ok(())
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Stone(color))
            .count()
    }

    /// Number of stones of either color on the board.
    pub fn stones_placed(&self) -> usize {
        self.cells.iter().filter(|c| c.color().is_some()).count()
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Record the current grid on top of the history stack.
    pub fn push_snapshot(&mut self) -> Result<(), BoardError> {
        if self.history_is_full() {
            return Err(BoardError::HistoryFull(self.history.len()));
        }
        self.history.push(Snapshot {
            cells: self.cells.clone().into_boxed_slice(),
            width: self.width,
        });
        trace!(len = self.history.len(), "pushed snapshot");
        Ok(())
    }

    /// Remove the top snapshot, first copying it into the live grid when
    /// `restore` is set. Returns `false` if the stack is empty.
    pub fn pop_snapshot(&mut self, restore: bool) -> bool {
        let Some(top) = self.history.pop() else {
            return false;
        };
        if restore {
            self.cells.copy_from_slice(top.cells());
        }
        trace!(len = self.history.len(), restore, "popped snapshot");
        true
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the top snapshot, `None` before the first move.
    pub fn history_top(&self) -> Option<usize> {
        self.history.len().checked_sub(1)
    }

    pub fn history_is_full(&self) -> bool {
        self.history.len() >= self.max_steps
    }

    pub fn snapshot(&self, step: usize) -> Option<&Snapshot> {
        self.history.get(step)
    }

    pub(crate) fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Overwrite the live grid with the snapshot at `step`.
    pub(crate) fn restore_snapshot(&mut self, step: usize) -> bool {
        match self.history.get(step) {
            Some(snap) => {
                self.cells.copy_from_slice(snap.cells());
                true
            }
            None => false,
        }
    }

    /// Set every playable point to `Empty`.
    pub(crate) fn clear_interior(&mut self) {
        for pt in self.interior_points() {
            let i = self.idx(pt);
            self.cells[i] = Cell::Empty;
        }
    }

    /// Replace the live grid with a validated working copy and record it.
    /// Nothing is written if the history is already full.
    pub(crate) fn commit(&mut self, cells: Vec<Cell>) -> Result<(), BoardError> {
        debug_assert_eq!(cells.len(), self.cells.len());
        if self.history_is_full() {
            return Err(BoardError::HistoryFull(self.history.len()));
        }
        self.cells = cells;
        self.push_snapshot()
    }

    // -------------------------------------------------------------------------
    // Undo budget
    // -------------------------------------------------------------------------

    pub fn undo_remaining(&self, color: Color) -> u32 {
        self.undo[color.index()]
    }

    /// Consume one undo for `color`. Returns `false` when none are left.
    pub fn spend_undo(&mut self, color: Color) -> bool {
        let left = &mut self.undo[color.index()];
        match left.checked_sub(1) {
            Some(n) => {
                *left = n;
                true
            }
            None => false,
        }
    }
}

/// The 4 orthogonal neighbors (N, S, W, E) of a grid index.
#[inline]
pub(crate) fn neighbors(i: usize, width: usize) -> [usize; 4] {
    [i - width, i + width, i - 1, i + 1]
}

/// Column letters used for vertices, skipping 'I'.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Parse a vertex such as `"D4"` into a point on a board of side `size`.
///
/// Columns use letters A-Z skipping I; rows count up from the bottom edge.
pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let col = COLUMNS.iter().position(|&c| c as char == letter)? + 1;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = digits.parse().ok()?;
    if col > size || number == 0 || number > size {
        return None;
    }
    Some((size + 1 - number, col))
}

/// Convert a playable point to its vertex name (e.g. `"D4"`).
pub fn vertex_name(pt: Point, size: usize) -> String {
    let (row, col) = pt;
    let letter = COLUMNS.get(col.wrapping_sub(1)).map_or('?', |&c| c as char);
    format!("{letter}{}", (size + 1).saturating_sub(row))
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.size {
            write!(f, "{:>2} ", self.size + 1 - row)?;
            for col in 1..=self.size {
                write!(f, "{} ", self.get((row, col)).symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for &c in &COLUMNS[..self.size] {
            write!(f, "{} ", c as char)?;
        }
        writeln!(f)
    }
}
