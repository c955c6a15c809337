/// The step function: advances the game by one tick.
///
/// Processing order:
///   1. Status gate (Started -> Running; paused/terminal states stop here)
///   2. Turn resolution (lock reset, axis check, lock set)
///   3. Wall collision on the next head cell
///   4. Self collision
///   5. Advance: grow onto food or move
///   6. Food placement / board-full check
///
/// A collision freezes the body where it was; only `alive` and the status change.

use rand::Rng;

use crate::domain::board;
use crate::domain::geometry::{Direction, Point};
use super::event::{Collision, StepEvent};
use super::food;
use super::state::{GameState, GameStatus};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<R: Rng + ?Sized>(
    state: &mut GameState,
    requested: Option<Direction>,
    rng: &mut R,
) -> Vec<StepEvent> {
    match state.status {
        GameStatus::Started => state.status = GameStatus::Running,
        GameStatus::Running => {}
        GameStatus::Paused | GameStatus::Failed | GameStatus::Succeeded => return vec![],
    }

    let mut events: Vec<StepEvent> = Vec::new();

    resolve_turn(state, requested, &mut events);

    let new_head = state.snake.next_head();
    if !board::in_interior(new_head) {
        fail(state, Collision::Wall, new_head, &mut events);
        return events;
    }

    let eats = state.food == Some(new_head);
    if state.snake.bites_itself(new_head, eats) {
        fail(state, Collision::SelfBite, new_head, &mut events);
        return events;
    }

    state.snake.advance(new_head, eats);

    if eats {
        state.score += 1;
        events.push(StepEvent::FoodEaten { at: new_head, score: state.score });
        resolve_food(state, rng, &mut events);
    } else {
        events.push(StepEvent::Moved { head: new_head });
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Turn
// ══════════════════════════════════════════════════════════════

fn resolve_turn(state: &mut GameState, requested: Option<Direction>, events: &mut Vec<StepEvent>) {
    state.snake.unlock();
    let Some(dir) = requested else { return };
    let from = state.snake.direction();
    if state.snake.turn(dir) {
        events.push(StepEvent::Turned { from, to: dir });
    }
}

// ══════════════════════════════════════════════════════════════
// Collision
// ══════════════════════════════════════════════════════════════

fn fail(state: &mut GameState, kind: Collision, at: Point, events: &mut Vec<StepEvent>) {
    state.snake.kill();
    state.status = GameStatus::Failed;
    events.push(StepEvent::Collided { kind, at });
}

// ══════════════════════════════════════════════════════════════
// Food
// ══════════════════════════════════════════════════════════════

fn resolve_food<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, events: &mut Vec<StepEvent>) {
    state.food = food::place_food(&state.snake, rng);
    match state.food {
        Some(at) => events.push(StepEvent::FoodPlaced { at }),
        None => {
            state.status = GameStatus::Succeeded;
            events.push(StepEvent::BoardFilled);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
