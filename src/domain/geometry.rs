/// Grid primitives: points and headings.
///
/// Screen convention: x grows to the right, y grows downward,
/// so `Up` decrements y.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    #[inline]
    pub fn offset(self, dir: Direction) -> Point {
        let (dx, dy) = dir.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit vector in screen coordinates.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Up/Down share an axis, Left/Right share the other.
    pub fn same_axis(self, other: Direction) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    #[allow(dead_code)]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    #[test]
    fn offset_follows_screen_axes() {
        let p = Point::new(5, 5);
        assert_eq!(p.offset(Direction::Up), Point::new(5, 4));
        assert_eq!(p.offset(Direction::Down), Point::new(5, 6));
        assert_eq!(p.offset(Direction::Left), Point::new(4, 5));
        assert_eq!(p.offset(Direction::Right), Point::new(6, 5));
    }

    #[test]
    fn opposite_is_on_same_axis() {
        for d in ALL {
            assert!(d.same_axis(d.opposite()));
            assert_ne!(d, d.opposite());
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn perpendicular_headings_differ_in_axis() {
        assert!(!Direction::Up.same_axis(Direction::Left));
        assert!(!Direction::Right.same_axis(Direction::Down));
        assert!(Direction::Left.same_axis(Direction::Right));
    }

    #[test]
    fn offset_then_opposite_returns_home() {
        let p = Point::from((3, 7));
        for d in ALL {
            assert_eq!(p.offset(d).offset(d.opposite()), p);
        }
    }
}
