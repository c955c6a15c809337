/// Presentation layer.
///
/// `draw` is a pure function from `GameState` to `Screen` calls: it keeps
/// nothing between frames, so drawing the same state twice gives the
/// same picture.
///
/// `Terminal` is the crossterm backend, double-buffered and diff-based:
///   1. `clear` / `set_cell` build the next frame into `front`
///   2. `present` compares each cell with `back` (the previous frame)
///   3. Only changed cells produce terminal commands, batched with `queue!`
///   4. One flush per frame, then `front` is copied into `back`
///
/// The terminal is restored when `Terminal` is dropped, which covers
/// normal exit, error returns and panic unwinding alike.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::board::{HEIGHT, WIDTH};
use crate::domain::geometry::Point;
use crate::sim::state::{GameState, GameStatus};
use super::theme::{Style, Theme, BODY_GLYPH, FOOD_GLYPH, HEAD_GLYPH};

// ── Screen: the drawing surface contract ──

pub trait Screen {
    /// Blank the whole next frame.
    fn clear(&mut self);

    /// Put one glyph at a board coordinate. Off-surface cells are ignored.
    fn set_cell(&mut self, x: i32, y: i32, glyph: char, style: Style);

    /// Show the frame built since the last `clear`.
    fn present(&mut self) -> io::Result<()>;

    /// Write a string left to right, one column per char.
    fn put_str(&mut self, x: i32, y: i32, s: &str, style: Style) {
        for (i, ch) in s.chars().enumerate() {
            self.set_cell(x + i as i32, y, ch, style);
        }
    }
}

// ── Layout ──

const SCORE_ROW: i32 = HEIGHT + 1;
const STATUS_ROW: i32 = HEIGHT + 2;
const HELP_ROW: i32 = HEIGHT + 3;

const HELP_TEXT: &str = "arrows/hjkl move  p pause  q quit";

fn status_line(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Started | GameStatus::Running => None,
        GameStatus::Paused => Some("Paused  [p] resume"),
        GameStatus::Failed => Some("You have lost  [q] quit"),
        GameStatus::Succeeded => Some("You have won  [q] quit"),
    }
}

// ── Frame composition ──

pub fn draw<S: Screen + ?Sized>(screen: &mut S, state: &GameState, theme: &Theme) -> io::Result<()> {
    screen.clear();

    draw_border(screen, theme.border);

    for (i, p) in state.snake.segments().enumerate() {
        if i == 0 {
            screen.set_cell(p.x, p.y, HEAD_GLYPH, theme.head);
        } else {
            screen.set_cell(p.x, p.y, BODY_GLYPH, theme.body);
        }
    }

    if let Some(Point { x, y }) = state.food {
        screen.set_cell(x, y, FOOD_GLYPH, theme.food);
    }

    screen.put_str(0, SCORE_ROW, &format!("Score: {}", state.score), theme.text);
    if let Some(line) = status_line(state.status) {
        screen.put_str(0, STATUS_ROW, line, theme.text);
    }
    screen.put_str(0, HELP_ROW, HELP_TEXT, theme.text);

    screen.present()
}

/// Frame: corners `/` `\`, horizontal `–`, vertical `|`.
/// Right edge sits at x = WIDTH, bottom edge at y = HEIGHT - 1.
fn draw_border<S: Screen + ?Sized>(screen: &mut S, style: Style) {
    let bottom = HEIGHT - 1;

    screen.set_cell(0, 0, '/', style);
    screen.set_cell(WIDTH, 0, '\\', style);
    screen.set_cell(0, bottom, '\\', style);
    screen.set_cell(WIDTH, bottom, '/', style);

    for x in 1..WIDTH {
        screen.set_cell(x, 0, '–', style);
        screen.set_cell(x, bottom, '–', style);
    }
    for y in 1..bottom {
        screen.set_cell(0, y, '|', style);
        screen.set_cell(WIDTH, y, '|', style);
    }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    style: Style,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::new(Color::Reset, Color::Reset),
    };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '\0',
        style: Style::new(Color::Magenta, Color::Magenta),
    };
}

// ── FrameBuffer: a 2D grid of Cells ──

#[derive(Debug)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }
}

// ── Terminal ──

pub struct Terminal {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    active: bool,
}

impl Terminal {
    /// Raw mode, alternate screen, hidden cursor.
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        // From here on, Drop undoes whatever succeeded.
        let mut term = Terminal {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            active: true,
        };

        execute!(
            term.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size()?;
        term.adopt_size(tw as usize, th as usize);

        Ok(term)
    }

    /// Leave the alternate screen and raw mode. Safe to call twice.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let screen = execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let raw = terminal::disable_raw_mode();
        screen.and(raw)
    }

    fn adopt_size(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
    }

    /// Detect terminal resize; a resize wipes the screen and the back buffer.
    fn sync_size(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size()?;
        if tw as usize != self.term_w || th as usize != self.term_h {
            // Carry the frame being presented over to the new size.
            let pending = std::mem::replace(&mut self.front, FrameBuffer::new(0, 0));
            self.adopt_size(tw as usize, th as usize);
            for y in 0..pending.height.min(self.term_h) {
                for x in 0..pending.width.min(self.term_w) {
                    self.front.set(x as i32, y as i32, pending.get(x, y));
                }
            }
            queue!(self.writer, ResetColor, Clear(ClearType::All))?;
        }
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_style: Option<Style> = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }

                if last_style != Some(cell.style) {
                    queue!(
                        self.writer,
                        SetForegroundColor(cell.style.fg),
                        SetBackgroundColor(cell.style.bg)
                    )?;
                    last_style = Some(cell.style);
                }

                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }
}

impl Screen for Terminal {
    fn clear(&mut self) {
        self.front.clear();
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        self.front.set(x, y, Cell { ch: glyph, style });
    }

    fn present(&mut self) -> io::Result<()> {
        self.sync_size()?;
        self.flush_diff()?;
        self.back.cells.copy_from_slice(&self.front.cells);
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            tracing::error!("terminal cleanup failed: {e}");
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Test double
// ══════════════════════════════════════════════════════════════
