/// Input translation.
///
/// `translate` is the only place that knows crossterm key codes; the
/// rest of the game sees `Command`s. `spawn_reader` runs it on a
/// dedicated thread that blocks on the terminal and hands each command
/// to the game loop.
///
/// Only Press/Repeat events count. Terminals with keyboard enhancement
/// also report Release, which would otherwise fire every binding twice.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::Sender;

use crate::domain::geometry::Direction;
use crate::sim::event::Command;

/// How long one poll waits before checking whether the loop is gone.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

// ── Key Constants ──

const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('K')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('J')];
const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('H')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('l'), KeyCode::Char('L')];
const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Char('p'), KeyCode::Char('P')];
const KEYS_EXIT: &[KeyCode] = &[KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Map one key event to at most one command.
pub fn translate(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Raw mode swallows SIGINT, so Ctrl+C has to be handled here
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Command::Exit);
    }

    let code = &key.code;
    if KEYS_UP.contains(code) {
        Some(Command::Move(Direction::Up))
    } else if KEYS_DOWN.contains(code) {
        Some(Command::Move(Direction::Down))
    } else if KEYS_LEFT.contains(code) {
        Some(Command::Move(Direction::Left))
    } else if KEYS_RIGHT.contains(code) {
        Some(Command::Move(Direction::Right))
    } else if KEYS_PAUSE.contains(code) {
        Some(Command::Pause)
    } else if KEYS_EXIT.contains(code) {
        Some(Command::Exit)
    } else {
        None
    }
}

/// Start the blocking reader thread.
///
/// The thread stops once the receiving side is dropped or the terminal
/// reports an I/O error. Either way the sender drops and the loop sees
/// the channel close; the terminal error is the thread's result.
/// `blocking_send` waits while the loop is busy; with a one-slot channel
/// at most one command queues up.
pub fn spawn_reader(tx: Sender<Command>) -> io::Result<JoinHandle<io::Result<()>>> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || read_keys(&tx, next_event))
}

/// One poll round. `Ok(None)` when nothing arrived within the timeout.
fn next_event() -> io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

fn read_keys<F>(tx: &Sender<Command>, mut next: F) -> io::Result<()>
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        let key = match next() {
            Ok(Some(Event::Key(key))) => key,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("input failed: {e}");
                return Err(e);
            }
        };

        let Some(cmd) = translate(&key) else { continue };
        tracing::trace!(?cmd, "key {:?}", key.code);
        if tx.blocking_send(cmd).is_err() {
            break;
        }
    }
    tracing::debug!("input reader stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vi_keys_move() {
        let table = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('k'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('j'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('h'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('l'), Direction::Right),
        ];
        for (code, dir) in table {
            assert_eq!(translate(&press(code)), Some(Command::Move(dir)), "{code:?}");
        }
    }

    #[test]
    fn pause_and_exit_keys() {
        assert_eq!(translate(&press(KeyCode::Char('p'))), Some(Command::Pause));
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q')] {
            assert_eq!(translate(&press(code)), Some(Command::Exit), "{code:?}");
        }
    }

    #[test]
    fn shifted_letters_match() {
        let k = KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT);
        assert_eq!(translate(&k), Some(Command::Move(Direction::Up)));
    }

    #[test]
    fn ctrl_c_exits() {
        let k = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(&k), Some(Command::Exit));
        // plain 'c' is not bound
        assert_eq!(translate(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn unbound_keys_yield_nothing() {
        for code in [KeyCode::Char('w'), KeyCode::Char(' '), KeyCode::Tab, KeyCode::F(1), KeyCode::Backspace] {
            assert_eq!(translate(&press(code)), None, "{code:?}");
        }
    }

    #[test]
    fn reader_forwards_keys_then_reports_terminal_error() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut script = vec![
            Ok(Some(Event::Key(press(KeyCode::Char('p'))))),
            Ok(None),
            Ok(Some(Event::FocusLost)),
            Ok(Some(Event::Key(press(KeyCode::Char('w'))))),
            Ok(Some(Event::Key(press(KeyCode::Left)))),
            Err(io::Error::other("tty gone")),
        ]
        .into_iter();

        let result = read_keys(&tx, || script.next().unwrap_or(Ok(None)));
        assert_eq!(result.unwrap_err().to_string(), "tty gone");
        assert_eq!(rx.try_recv().unwrap(), Command::Pause);
        assert_eq!(rx.try_recv().unwrap(), Command::Move(Direction::Left));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reader_stops_cleanly_when_loop_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let result = read_keys(&tx, || -> io::Result<Option<Event>> { panic!("polled after hang-up") });
        assert!(result.is_ok());
    }

    #[test]
    fn release_events_are_ignored() {
        let k = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(&k), None);
        let k = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(translate(&k), Some(Command::Move(Direction::Up)));
    }
}
