/// Board geometry: a fixed 30x20 frame with a one-cell border.
///
/// Columns `0` and `WIDTH` and rows `0` and `HEIGHT - 1` hold the frame.
/// Everything strictly inside is playable:
///   x in [1, WIDTH - 1], y in [1, HEIGHT - 2]

use super::geometry::Point;

pub const WIDTH: i32 = 30;
pub const HEIGHT: i32 = 20;

pub const MIN_X: i32 = 1;
pub const MAX_X: i32 = WIDTH - 1;
pub const MIN_Y: i32 = 1;
pub const MAX_Y: i32 = HEIGHT - 2;

/// Number of playable cells.
pub const INTERIOR_CELLS: usize = ((MAX_X - MIN_X + 1) * (MAX_Y - MIN_Y + 1)) as usize;

#[inline]
pub fn in_interior(p: Point) -> bool {
    (MIN_X..=MAX_X).contains(&p.x) && (MIN_Y..=MAX_Y).contains(&p.y)
}

/// Row-major walk over every playable cell.
pub fn interior_cells() -> impl Iterator<Item = Point> {
    (MIN_Y..=MAX_Y).flat_map(|y| (MIN_X..=MAX_X).map(move |x| Point::new(x, y)))
}
