//! Board geometry and rule defaults.
//!
//! The board is stored as a padded grid: the playable `N x N` area sits inside
//! a one-cell ring of wall sentinels, so neighbor lookups never need bounds
//! checks. For the standard 19x19 board the buffer is 21x21.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
pub const N: usize = 19;

/// Smallest supported board size.
pub const MIN_SIZE: usize = 2;

/// Largest supported board size (vertex letters run out at 25 columns).
pub const MAX_SIZE: usize = 25;

/// Width of the padded buffer for a board of side `size`.
#[inline]
pub const fn padded_width(size: usize) -> usize {
    size + 2
}

// =============================================================================
// Rule Defaults
// =============================================================================

/// Maximum number of recorded history snapshots per game.
pub const MAX_STEPS: usize = 1000;

/// Undo requests granted to each color per game.
pub const UNDO_BUDGET: u32 = 1;

/// Stones on the board before territory is attributed in the area count
/// (just over half of the 361 points of a 19x19 board).
pub const AREA_THRESHOLD: usize = 181;

/// Compensation subtracted from Black's area count.
pub const KOMI: f32 = 3.5;

/// Stone threshold for an arbitrary board size: half the points, rounded up.
#[inline]
pub const fn area_threshold_for(size: usize) -> usize {
    size.saturating_mul(size).div_ceil(2)
}
