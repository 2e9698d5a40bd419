use crate::geometry::{self, Cell};
use crate::{Coords, TermInt};
use std::io::{Stdout, Write, stdout};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

const SNAKE_BODY_CHARS: [char; 2] = ['█', '█'];
const APPLE_CHARS: [char; 2] = ['(', ')'];
/// Each board cell is two terminal columns wide so it looks square.
const CELL_COLUMNS: TermInt = 2;

/// Columns and rows the board needs: border, cells and the score line.
pub fn required_size() -> Coords {
    let w = geometry::cols() as TermInt * CELL_COLUMNS + 2;
    let h = geometry::rows() as TermInt + 3;
    (w, h)
}

/// Screen position of a board cell, relative to the board's top-left corner.
pub fn cell_to_screen(pos: Cell) -> Option<Coords> {
    if !geometry::on_board(pos) {
        return None;
    }

    let (col, row) = geometry::to_grid(pos);
    Some((1 + col as TermInt * CELL_COLUMNS, 2 + row as TermInt))
}

pub struct TermRenderer {
    width: TermInt,
    height: TermInt,
    origin: Coords,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermRenderer {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let (need_w, need_h) = required_size();

        if width < need_w || height < need_h {
            bail!("terminal is {}x{}, the board needs at least {}x{}", width, height, need_w, need_h);
        }

        let origin = ((width - need_w) / 2, (height - need_h) / 2);
        let screen = vec![' '; width as usize * height as usize];

        Ok(TermRenderer { width, height, origin, stdout: stdout(), screen, current_msg: None, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        self.active = true;

        self.clear()?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.active = false;
        restore_terminal()
    }

    pub fn draw_frame(&mut self, segments: &[Cell], apple: Cell, score: usize) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let (board_w, _) = required_size();
        let cols = geometry::cols() as usize;
        let rows = geometry::rows() as usize;
        let mut board = vec![[' ', ' ']; cols * rows];

        let mut put = |pos: Cell, chars: [char; 2]| {
            if geometry::on_board(pos) {
                let (col, row) = geometry::to_grid(pos);
                board[row as usize * cols + col as usize] = chars;
            }
        };

        for seg in segments {
            put(*seg, SNAKE_BODY_CHARS);
        }
        put(apple, APPLE_CHARS);

        for (i, chars) in board.iter().enumerate() {
            let pos = geometry::cell((i % cols) as i32, (i / cols) as i32);
            if let Some((x, y)) = cell_to_screen(pos) {
                self.print_at((x, y), chars[0])?;
                self.print_at((x + 1, y), chars[1])?;
            }
        }

        let score_line = format!("{:>width$}", format!("Score: {}", score), width = board_w as usize - 1);
        for (x, ch) in score_line.chars().enumerate() {
            self.print_at((x as TermInt, 0), ch)?;
        }

        self.flush()
    }

    pub fn show_game_over(&mut self, score: usize) -> Result<()> {
        self.show_message(&[
            &*format!("Game is over! Your score is {}", score),
            "Press Enter to play again. Press Escape to exit.",
        ])
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = required_size();
        let (top, bottom) = (1, height - 1);

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((0, y), '|')?;
            self.print_at((width - 1, y), '|')?;
        }

        self.flush()
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let (board_w, board_h) = required_size();
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (board_w / 2, board_h / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Blank lines above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back what the message covered
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = self.screen_at(pos).unwrap_or(' ');
                self.print_at_no_save(pos, ch)?;
            }
        }

        self.flush()
    }

    /// Board-relative print that skips characters already on screen.
    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        let idx = match self.index(pos) {
            Some(idx) => idx,
            None => return Ok(()),
        };

        if self.screen[idx] != ch {
            self.print_at_no_save(pos, ch)?;
            self.screen[idx] = ch;
        }

        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        let (x, y) = (self.origin.0 + pos.0, self.origin.1 + pos.1);
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch)).context("queueing output")?;
        Ok(())
    }

    fn screen_at(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|idx| self.screen[idx])
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        let (x, y) = (self.origin.0 + pos.0, self.origin.1 + pos.1);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.width as usize * y as usize + x as usize)
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }
}

impl Drop for TermRenderer {
    fn drop(&mut self) {
        if self.active {
            let _ = self.restore();
        }
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    let mut out = stdout();
    terminal::disable_raw_mode().context("disabling raw mode")?;
    execute!(out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
        .context("leaving alternate screen")?;
    Ok(())
}
