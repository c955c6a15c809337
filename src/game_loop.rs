/// The game loop: sole owner of `GameState`.
///
/// Two sources feed it: commands from the input thread and a fixed
/// 100 ms tick. `run` merges them with `select!`, so exactly one command
/// or one tick is handled at a time and state is never touched anywhere
/// else. Which branch wins when both are ready is up to `select!`.
///
/// Moves are not applied on arrival. The latest one is buffered and
/// handed to `step` on the next tick.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc::Receiver;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::domain::geometry::Direction;
use crate::error::GameError;
use crate::sim::event::{Command, StepEvent};
use crate::sim::state::GameState;
use crate::sim::step;
use crate::ui::renderer::{self, Screen};
use crate::ui::theme::Theme;

pub const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct GameLoop<S: Screen, R: Rng> {
    state: GameState,
    pending: Option<Direction>,
    rng: R,
    screen: S,
    theme: Theme,
}

impl<S: Screen, R: Rng> GameLoop<S, R> {
    pub fn new(state: GameState, screen: S, rng: R, theme: Theme) -> Self {
        GameLoop { state, pending: None, rng, screen, theme }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Drive the game until an exit command arrives or the input side hangs up.
    pub async fn run(&mut self, commands: &mut Receiver<Command>, period: Duration) -> Result<(), GameError> {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.redraw()?;

        loop {
            tokio::select! {
                cmd = commands.recv() => {
                    let Some(cmd) = cmd else {
                        debug!("command channel closed");
                        break;
                    };
                    if self.handle_command(cmd)? == Flow::Exit {
                        break;
                    }
                }
                _ = ticker.tick() => self.handle_tick()?,
            }
        }

        info!(score = self.state.score, status = ?self.state.status, "game loop finished");
        Ok(())
    }

    pub fn handle_command(&mut self, cmd: Command) -> Result<Flow, GameError> {
        match cmd {
            Command::Exit => {
                info!("exit requested");
                return Ok(Flow::Exit);
            }
            Command::Pause => {
                if self.state.toggle_pause() {
                    // a move typed before pausing must not fire after resume
                    self.pending = None;
                    info!(status = ?self.state.status, "pause toggled");
                    self.redraw()?;
                }
            }
            Command::Move(dir) => {
                if self.state.status.is_live() {
                    trace!(?dir, "move buffered");
                    self.pending = Some(dir);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// One simulation tick. Paused, Failed and Succeeded make this a no-op.
    pub fn handle_tick(&mut self) -> Result<(), GameError> {
        if !self.state.status.is_live() {
            return Ok(());
        }

        let before = self.state.status;
        let events = step::step(&mut self.state, self.pending.take(), &mut self.rng);
        log_events(&events);
        if self.state.status != before {
            info!(
                from = ?before,
                to = ?self.state.status,
                score = self.state.score,
                length = self.state.snake.len(),
                "status changed"
            );
            if self.state.status.is_terminal() {
                info!("board frozen until exit");
            }
        }

        self.redraw()
    }

    fn redraw(&mut self) -> Result<(), GameError> {
        renderer::draw(&mut self.screen, &self.state, &self.theme)?;
        Ok(())
    }
}

fn log_events(events: &[StepEvent]) {
    for event in events {
        match event {
            StepEvent::Turned { from, to } => trace!(?from, ?to, "turned"),
            StepEvent::Moved { .. } => {}
            StepEvent::FoodEaten { at, score } => debug!(x = at.x, y = at.y, score, "food eaten"),
            StepEvent::FoodPlaced { at } => debug!(x = at.x, y = at.y, "food placed"),
            StepEvent::Collided { kind, at } => info!(?kind, x = at.x, y = at.y, "collision"),
            StepEvent::BoardFilled => info!("board filled"),
        }
    }
}
