use anyhow::Context;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ripple::{Frame, Rgb};
use std::io::{self, Stdout, Write};

/// Terminal rows kept for the status line.
pub(crate) const HUD_ROWS: u16 = 1;

// Upper half block: foreground paints the top grid row, background the bottom.
const HALF: char = '\u{2580}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

fn to_color(p: Rgb) -> Color {
    Color::Rgb {
        r: p.r,
        g: p.g,
        b: p.b,
    }
}

/// Owns stdout while the app runs. Raw mode, the alternate screen and mouse
/// capture are undone on drop, including on error paths.
pub(crate) struct Screen {
    out: Stdout,
    cols: u16,
    rows: u16,
    prev: Vec<Cell>,
    cur: Vec<Cell>,
}

impl Screen {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        let (cols, rows) = terminal::size()?;
        let n = cols as usize * rows as usize;
        Ok(Self {
            out,
            cols,
            rows,
            prev: vec![Cell::default(); n],
            cur: vec![Cell::default(); n],
        })
    }

    /// Grid size that fills the area below the HUD, two grid rows per
    /// terminal row.
    pub(crate) fn grid_size(&self) -> (usize, usize) {
        let w = self.cols.max(1) as usize;
        let h = self.rows.saturating_sub(HUD_ROWS).max(1) as usize * 2;
        (w, h)
    }

    /// Terminal cell to grid cell; `None` over the HUD.
    pub(crate) fn to_grid(&self, col: u16, row: u16) -> Option<(i64, i64)> {
        if row < HUD_ROWS {
            return None;
        }
        Some((col as i64, (row - HUD_ROWS) as i64 * 2))
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        let n = c as usize * r as usize;
        self.prev = vec![Cell::default(); n];
        self.cur = vec![Cell::default(); n];
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.cols && y < self.rows {
            let i = y as usize * self.cols as usize + x as usize;
            self.cur[i] = c;
        }
    }

    pub(crate) fn draw_frame(&mut self, frame: &Frame) {
        let rows = self.rows.saturating_sub(HUD_ROWS);
        for ty in 0..rows {
            let gy = ty as usize * 2;
            for tx in 0..self.cols {
                let gx = tx as usize;
                let Some(top) = frame.get(gx, gy) else {
                    continue;
                };
                let bottom = frame.get(gx, gy + 1).unwrap_or(top);
                self.set(
                    tx,
                    ty + HUD_ROWS,
                    Cell {
                        ch: HALF,
                        fg: to_color(top),
                        bg: to_color(bottom),
                    },
                );
            }
        }
    }

    pub(crate) fn draw_hud(&mut self, line: &str) {
        let mut chars = line.chars();
        for x in 0..self.cols {
            let ch = chars.next().unwrap_or(' ');
            for y in 0..HUD_ROWS {
                self.set(
                    x,
                    y,
                    Cell {
                        ch: if y == 0 { ch } else { ' ' },
                        ..Cell::default()
                    },
                );
            }
        }
    }

    /// Write the cells that changed since the last present.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = y as usize * self.cols as usize + x as usize;
                let c = self.cur[i];
                if c == self.prev[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
