/// Food placement: a uniform pick among free interior cells.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::board;
use crate::domain::geometry::Point;
use crate::domain::snake::Snake;

/// Choose a cell for the next food, or `None` when the snake covers
/// the whole interior.
pub fn place_food<R: Rng + ?Sized>(snake: &Snake, rng: &mut R) -> Option<Point> {
    let mut free: Vec<Point> = Vec::with_capacity(board::INTERIOR_CELLS);
    free.extend(board::interior_cells().filter(|&p| !snake.occupies(p)));
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Boustrophedon path over the interior, head last-visited first.
    fn snake_covering(cells: usize) -> Snake {
        let mut path: Vec<Point> = Vec::new();
        for y in board::MIN_Y..=board::MAX_Y {
            let row: Vec<i32> = if (y - board::MIN_Y) % 2 == 0 {
                (board::MIN_X..=board::MAX_X).collect()
            } else {
                (board::MIN_X..=board::MAX_X).rev().collect()
            };
            path.extend(row.into_iter().map(|x| Point::new(x, y)));
        }
        path.truncate(cells);
        path.reverse();
        Snake::new(path, Direction::Right)
    }

    #[test]
    fn never_lands_on_snake() {
        let snake = Snake::spawn();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = place_food(&snake, &mut rng).unwrap();
            assert!(board::in_interior(p));
            assert!(!snake.occupies(p));
        }
    }

    #[test]
    fn single_free_cell_is_chosen() {
        let snake = snake_covering(board::INTERIOR_CELLS - 1);
        let mut rng = StdRng::seed_from_u64(99);
        let p = place_food(&snake, &mut rng).unwrap();
        assert!(!snake.occupies(p));
        assert_eq!(board::interior_cells().filter(|&c| !snake.occupies(c)).count(), 1);
    }

    #[test]
    fn full_board_yields_none() {
        let snake = snake_covering(board::INTERIOR_CELLS);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(place_food(&snake, &mut rng), None);
    }

    #[test]
    fn same_seed_same_sequence() {
        let snake = Snake::spawn();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let seq_a: Vec<_> = (0..20).map(|_| place_food(&snake, &mut a)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| place_food(&snake, &mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
