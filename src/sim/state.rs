/// GameState: everything the simulation knows, owned by the game loop.

use rand::Rng;

use crate::domain::geometry::Point;
use crate::domain::snake::Snake;
use super::food;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// Waiting for the first tick.
    Started,
    Running,
    Paused,
    /// Hit a wall or itself. Terminal.
    Failed,
    /// Filled the board. Terminal.
    Succeeded,
}

impl GameStatus {
    /// Does a tick advance the simulation in this status?
    pub fn is_live(self) -> bool {
        matches!(self, GameStatus::Started | GameStatus::Running)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Failed | GameStatus::Succeeded)
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board is full.
    pub food: Option<Point>,
    pub score: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Fresh game: spawn snake, drop the first food.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let snake = Snake::spawn();
        let food = food::place_food(&snake, rng);
        GameState::with_parts(snake, food)
    }

    /// Build from explicit pieces (scripted setups, tests).
    pub fn with_parts(snake: Snake, food: Option<Point>) -> Self {
        debug_assert!(food.map_or(true, |f| !snake.occupies(f)), "food placed on snake");
        GameState { snake, food, score: 0, status: GameStatus::Started }
    }

    /// Running <-> Paused. Any other status is left alone.
    /// Returns whether the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_game_starts_with_food_off_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(&mut rng);
        assert_eq!(state.status, GameStatus::Started);
        assert_eq!(state.score, 0);
        let food = state.food.expect("fresh board has room for food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn pause_toggles_only_from_running_or_paused() {
        let mut state = GameState::with_parts(Snake::spawn(), Some(Point::new(10, 10)));
        assert!(!state.toggle_pause());
        assert_eq!(state.status, GameStatus::Started);

        state.status = GameStatus::Running;
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Running);

        state.status = GameStatus::Failed;
        assert!(!state.toggle_pause());
        assert_eq!(state.status, GameStatus::Failed);
    }

    #[test]
    fn status_classes() {
        assert!(GameStatus::Started.is_live());
        assert!(GameStatus::Running.is_live());
        assert!(!GameStatus::Paused.is_live());
        assert!(GameStatus::Failed.is_terminal());
        assert!(GameStatus::Succeeded.is_terminal());
        assert!(!GameStatus::Paused.is_terminal());
    }
}
