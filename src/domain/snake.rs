/// The snake: an ordered body, a heading and a per-tick turn lock.
///
/// `body[0]` is the head. The body never becomes empty and, while the
/// snake is alive, never holds the same cell twice.

use std::collections::VecDeque;

use super::geometry::{Direction, Point};

pub const INITIAL_BODY: [Point; 3] = [Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];
pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    alive: bool,
    /// Set once a turn has been accepted this tick; cleared at tick start.
    movement_locked: bool,
}

impl Snake {
    pub fn new(body: impl IntoIterator<Item = Point>, direction: Direction) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake body must not be empty");
        let snake = Snake { body, direction, alive: true, movement_locked: false };
        debug_assert!(!snake.has_overlap(), "snake body overlaps itself");
        snake
    }

    /// The starting snake: three cells heading right.
    pub fn spawn() -> Self {
        Snake::new(INITIAL_BODY, INITIAL_DIRECTION)
    }

    // ── Queries ──

    pub fn head(&self) -> Point {
        self.body[0]
    }

    #[allow(dead_code)]
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Head first.
    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[allow(dead_code)]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[allow(dead_code)]
    pub fn is_locked(&self) -> bool {
        self.movement_locked
    }

    /// Where the head lands on the next advance.
    pub fn next_head(&self) -> Point {
        self.head().offset(self.direction)
    }

    /// Would moving the head to `new_head` run into the body?
    ///
    /// The tail cell is vacated by a plain move, so it only counts
    /// when the snake grows on this move.
    pub fn bites_itself(&self, new_head: Point, grows: bool) -> bool {
        let staying = if grows { self.body.len() } else { self.body.len() - 1 };
        self.body.iter().take(staying).skip(1).any(|&p| p == new_head)
    }

    // ── Mutation ──

    pub fn unlock(&mut self) {
        self.movement_locked = false;
    }

    /// Try to change heading. Only a perpendicular turn is accepted,
    /// and only one per tick. Returns whether the heading changed.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if self.movement_locked || dir.same_axis(self.direction) {
            return false;
        }
        self.direction = dir;
        self.movement_locked = true;
        true
    }

    /// Push `new_head` on the front; drop the tail unless growing.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        debug_assert!(self.alive, "dead snake cannot move");
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        debug_assert!(!self.has_overlap(), "snake body overlaps itself after move");
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    fn has_overlap(&self) -> bool {
        self.body.iter().enumerate().any(|(i, p)| self.body.iter().skip(i + 1).any(|q| q == p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(cells: &[(i32, i32)], dir: Direction) -> Snake {
        Snake::new(cells.iter().map(|&c| Point::from(c)), dir)
    }

    #[test]
    fn spawn_matches_initial_layout() {
        let s = Snake::spawn();
        assert_eq!(s.len(), 3);
        assert_eq!(s.head(), Point::new(5, 5));
        assert_eq!(s.tail(), Point::new(3, 5));
        assert_eq!(s.direction(), Direction::Right);
        assert!(s.is_alive());
        assert!(!s.is_locked());
    }

    #[test]
    fn perpendicular_turn_accepted_and_locks() {
        let mut s = Snake::spawn();
        assert!(s.turn(Direction::Up));
        assert_eq!(s.direction(), Direction::Up);
        assert!(s.is_locked());
    }

    #[test]
    fn reversal_rejected() {
        let mut s = Snake::spawn();
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.direction(), Direction::Right);
        assert!(!s.is_locked());
    }

    #[test]
    fn same_direction_is_noop_and_does_not_lock() {
        let mut s = Snake::spawn();
        for _ in 0..5 {
            assert!(!s.turn(Direction::Right));
        }
        assert!(!s.is_locked());
    }

    #[test]
    fn lock_blocks_second_turn_until_unlock() {
        let mut s = Snake::spawn();
        assert!(s.turn(Direction::Up));
        // Left is perpendicular to Up, but the lock holds
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.direction(), Direction::Up);
        s.unlock();
        assert!(s.turn(Direction::Left));
        assert_eq!(s.direction(), Direction::Left);
    }

    #[test]
    fn advance_moves_or_grows() {
        let mut s = Snake::spawn();
        s.advance(s.next_head(), false);
        assert_eq!(s.segments().collect::<Vec<_>>(), vec![
            Point::new(6, 5), Point::new(5, 5), Point::new(4, 5),
        ]);
        s.advance(s.next_head(), true);
        assert_eq!(s.len(), 4);
        assert_eq!(s.head(), Point::new(7, 5));
        assert_eq!(s.tail(), Point::new(4, 5));
    }

    #[test]
    fn moving_into_vacating_tail_is_not_a_bite() {
        // 2x2 loop: head (2,1), then (2,2), (1,2), tail (1,1); heading Left
        let s = snake_at(&[(2, 1), (2, 2), (1, 2), (1, 1)], Direction::Left);
        let target = s.next_head();
        assert_eq!(target, s.tail());
        assert!(!s.bites_itself(target, false));
        assert!(s.bites_itself(target, true));
    }

    #[test]
    fn moving_into_neck_is_a_bite() {
        let s = snake_at(&[(3, 1), (3, 2), (2, 2), (2, 1), (1, 1)], Direction::Left);
        assert!(s.bites_itself(Point::new(2, 1), false));
        assert!(s.bites_itself(Point::new(3, 2), false));
        assert!(!s.bites_itself(Point::new(4, 1), false));
    }

    #[test]
    fn kill_clears_alive_only() {
        let mut s = Snake::spawn();
        s.kill();
        assert!(!s.is_alive());
        assert_eq!(s.len(), 3);
    }
}
