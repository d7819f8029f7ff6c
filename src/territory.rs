//! End-of-game detection and area counting.

use std::fmt;

use crate::board::{BoardState, Cell, Color, neighbors};
use crate::config::Config;
use crate::placement::is_legal;

/// Whether `color` has no legal move anywhere on the board.
///
/// Probes every playable point; stops at the first legal one.
pub fn has_no_legal_move(board: &BoardState, color: Color) -> bool {
    !board.interior_points().any(|pt| is_legal(board, pt, color))
}

/// Area count `(black, white)` with the default stone threshold for the
/// board size.
pub fn count_area(board: &BoardState) -> (f32, f32) {
    count_area_with(board, Config::for_size(board.size()).area_threshold)
}

/// Area count `(black, white)`.
///
/// Below `threshold` stones only stones are counted. Otherwise every empty
/// region is attributed to the color that alone borders it; regions touching
/// both colors are split half and half per point, regions touching neither
/// count for nobody.
pub fn count_area_with(board: &BoardState, threshold: usize) -> (f32, f32) {
    let mut black = board.stone_count(Color::Black) as f32;
    let mut white = board.stone_count(Color::White) as f32;
    if board.stones_placed() < threshold {
        return (black, white);
    }

    let cells = board.cells();
    let width = board.width();
    let mut seen = vec![false; cells.len()];
    let mut region = Vec::new();

    for pt in board.interior_points() {
        let start = board.idx(pt);
        if cells[start] != Cell::Empty || seen[start] {
            continue;
        }

        // Flood the empty region with an explicit worklist.
        region.clear();
        let (mut touches_black, mut touches_white) = (false, false);
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(i) = stack.pop() {
            region.push(i);
            for n in neighbors(i, width) {
                match cells[n] {
                    Cell::Empty if !seen[n] => {
                        seen[n] = true;
                        stack.push(n);
                    }
                    Cell::Stone(Color::Black) => touches_black = true,
                    Cell::Stone(Color::White) => touches_white = true,
                    _ => {}
                }
            }
        }

        let points = region.len() as f32;
        match (touches_black, touches_white) {
            (true, false) => black += points,
            (false, true) => white += points,
            (true, true) => {
                black += points * 0.5;
                white += points * 0.5;
            }
            (false, false) => {}
        }
    }
    (black, white)
}

/// Final area count with komi applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaScore {
    pub black: f32,
    pub white: f32,
    pub komi: f32,
}

impl AreaScore {
    pub fn compute(board: &BoardState, config: &Config) -> Self {
        let (black, white) = count_area_with(board, config.area_threshold);
        AreaScore {
            black,
            white,
            komi: config.komi,
        }
    }

    /// Black's lead after komi; negative when White leads.
    pub fn margin(&self) -> f32 {
        self.black - self.komi - self.white
    }

    /// The color ahead after komi, `None` on an exact tie.
    pub fn leader(&self) -> Option<Color> {
        let m = self.margin();
        if m > 0.0 {
            Some(Color::Black)
        } else if m < 0.0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl fmt::Display for AreaScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "black {} (-{} komi = {}), white {}",
            self.black,
            self.komi,
            self.black - self.komi,
            self.white
        )
    }
}
