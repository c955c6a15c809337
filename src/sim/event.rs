/// Loop inputs (commands) and step outputs (events).
/// The loop logs step events; nothing else consumes them.

use crate::domain::geometry::{Direction, Point};

/// A semantic request from the player, already detached from key codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Pause,
    Exit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Emitted during a simulation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Turned { from: Direction, to: Direction },
    Moved { head: Point },
    FoodEaten { at: Point, score: u32 },
    FoodPlaced { at: Point },
    Collided { kind: Collision, at: Point },
    BoardFilled,
}
