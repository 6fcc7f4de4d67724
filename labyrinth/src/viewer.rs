//! Terminal animation of a found route.
//!
//! A robot (`R`) walks the path one cell per tick, leaving `*` behind.
//! `+` and `-` change the speed; `q` or Esc quits.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use labyrinth_core::{Cell, Grid, PATH_MARK};

const ROBOT: char = 'R';
const MIN_DELAY: Duration = Duration::from_millis(10);
const MAX_DELAY: Duration = Duration::from_millis(2000);

/// Raw mode and the alternate screen, undone on drop so the terminal is
/// restored even when drawing fails midway.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press asks the animation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Quit,
    Delay(Duration),
    Ignore,
}

fn control(key: KeyCode, delay: Duration) -> Control {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Control::Quit,
        KeyCode::Char('+') | KeyCode::Char('=') => Control::Delay((delay / 2).max(MIN_DELAY)),
        KeyCode::Char('-') => Control::Delay((delay * 2).min(MAX_DELAY)),
        _ => Control::Ignore,
    }
}

/// The grid as glyph rows with the robot at `path[step]` and the cells it
/// has already walked through marked.
///
/// S and E keep their own glyph unless the robot stands on them.
fn frame(grid: &Grid, path: &[Cell], step: usize) -> Vec<Vec<char>> {
    let mut rows: Vec<Vec<char>> = (0..grid.rows())
        .map(|r| {
            (0..grid.cols())
                .map(|c| grid.terrain(Cell::new(r, c)).map_or(' ', |t| t.code()))
                .collect()
        })
        .collect();

    let mut put = |c: Cell, ch: char| {
        if let Some(slot) = rows
            .get_mut(c.row as usize)
            .and_then(|row| row.get_mut(c.col as usize))
        {
            *slot = ch;
        }
    };
    let step = step.min(path.len().saturating_sub(1));
    for &c in path.iter().take(step).skip(1) {
        put(c, PATH_MARK);
    }
    if let Some(&c) = path.get(step) {
        put(c, ROBOT);
    }
    rows
}

fn color(ch: char) -> Color {
    match ch {
        'S' => Color::Green,
        'E' => Color::Red,
        '#' => Color::DarkGrey,
        ROBOT => Color::Yellow,
        PATH_MARK => Color::Cyan,
        '2'..='9' => Color::Magenta,
        _ => Color::Reset,
    }
}

/// Terminal row for grid row `r`. Rows past what a cursor position can
/// address (the last value is kept free so `MoveTo` can add one) get `None`.
fn screen_row(r: usize) -> Option<u16> {
    u16::try_from(r).ok().filter(|&y| y < u16::MAX)
}

fn draw(out: &mut impl Write, rows: &[Vec<char>], status: &str) -> io::Result<()> {
    for (r, row) in rows.iter().enumerate() {
        let Some(y) = screen_row(r) else {
            break;
        };
        queue!(out, cursor::MoveTo(0, y))?;
        for &ch in row {
            queue!(out, SetForegroundColor(color(ch)), Print(ch), Print(' '))?;
        }
    }
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, screen_row(rows.len() + 1).unwrap_or(u16::MAX - 1)),
        terminal::Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    out.flush()
}

/// Wait up to `delay` for input. Returns `false` when the user quits.
fn wait(delay: &mut Duration) -> io::Result<bool> {
    let deadline = Instant::now() + *delay;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(true);
        }
        if !event::poll(deadline - now)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match control(key.code, *delay) {
                Control::Quit => return Ok(false),
                Control::Delay(d) => *delay = d,
                Control::Ignore => {}
            }
        }
    }
}

/// Animate `path` over `grid` until the robot arrives and a key is pressed,
/// or the user quits.
pub fn animate(grid: &Grid, path: &[Cell], delay_ms: u64) -> io::Result<()> {
    if path.is_empty() {
        return Ok(());
    }
    let mut delay = Duration::from_millis(delay_ms).clamp(MIN_DELAY, MAX_DELAY);
    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let last = path.len() - 1;

    for step in 0..=last {
        let status = format!(
            "step {step}/{last}  delay {} ms  [+/-] speed  [q] quit",
            delay.as_millis()
        );
        draw(&mut out, &frame(grid, path, step), &status)?;
        if step < last && !wait(&mut delay)? {
            log::debug!("animation stopped at step {step}");
            return Ok(());
        }
    }

    draw(
        &mut out,
        &frame(grid, path, last),
        &format!("arrived in {last} steps, press any key"),
    )?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
