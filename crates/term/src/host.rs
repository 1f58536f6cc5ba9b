//! TerminalHost: draws the game straight to a real terminal.
//!
//! Host callbacks cannot fail, so every command is queued into an in-memory
//! buffer and the first encoding error is kept until [`TerminalHost::flush`]
//! reports it.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{GameConfig, Host, Piece, Playfield, SimpleRng};
use crate::layout::{palette, Layout, Rgb, FIELD_BG, FRAME_FG};
use crate::types::{Color as CellColor, GameEvent, EMPTY, MIN_COLUMNS, MIN_ROWS};

const BLOCK: &str = "██";
const BLANK: &str = "  ";

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

pub struct TerminalHost {
    stdout: io::Stdout,
    buf: Vec<u8>,
    layout: Layout,
    rng: SimpleRng,
    error: Option<io::Error>,
}

impl TerminalHost {
    /// Create a host for a game with `config`, seeding its random source
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        let rows = config.rows.max(MIN_ROWS);
        let columns = config.columns.max(MIN_COLUMNS);
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            layout: Layout::new(rows, columns),
            rng: SimpleRng::new(seed),
            error: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw the border around the field and the static labels
    pub fn draw_frame(&mut self) {
        let result = self.encode_frame();
        self.record(result);
    }

    /// Draw level, score and line count next to the field
    pub fn draw_stats(&mut self, level: u8, score: u32, lines: u32) {
        let (x, y) = self.layout.stats_origin();
        let result = self.encode_text(x, y, &format!("Level {:<6}", level)).and_then(|_| {
            self.encode_text(x, y + 1, &format!("Score {:<6}", score))?;
            self.encode_text(x, y + 2, &format!("Lines {:<6}", lines))
        });
        self.record(result);
    }

    /// Replace the status line below the field
    pub fn show_message(&mut self, text: &str) {
        let (x, y) = self.layout.status_line();
        let width = self.layout.frame_width() as usize + 24;
        let line = format!("{:<width$}", text, width = width);
        let result = self.encode_text(x, y, &line);
        self.record(result);
    }

    /// Write all queued commands to the terminal
    ///
    /// Returns the first error hit while encoding since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(err) = self.error.take() {
            self.buf.clear();
            return Err(err.into());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        self.buf.clear();
        Ok(())
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn encode_text(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        self.buf.queue(cursor::MoveTo(x, y))?;
        self.buf.queue(SetForegroundColor(term_color(FRAME_FG)))?;
        self.buf.queue(Print(text))?;
        self.buf.queue(ResetColor)?;
        Ok(())
    }

    fn encode_frame(&mut self) -> io::Result<()> {
        let (x0, y0) = self.layout.origin;
        let inner = (self.layout.frame_width() - 2) as usize;
        let bottom = y0 + self.layout.frame_height() - 1;

        self.buf.queue(SetForegroundColor(term_color(FRAME_FG)))?;
        self.buf.queue(cursor::MoveTo(x0, y0))?;
        self.buf.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
        for y in y0 + 1..bottom {
            self.buf.queue(cursor::MoveTo(x0, y))?;
            self.buf.queue(Print("│"))?;
            self.buf.queue(cursor::MoveTo(x0 + inner as u16 + 1, y))?;
            self.buf.queue(Print("│"))?;
        }
        self.buf.queue(cursor::MoveTo(x0, bottom))?;
        self.buf.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

        let (px, py) = self.layout.preview_origin();
        self.buf.queue(cursor::MoveTo(px, py - 1))?;
        self.buf.queue(Print("Next"))?;
        self.buf.queue(ResetColor)?;
        Ok(())
    }

    fn encode_cell(&mut self, x: u16, y: u16, color: CellColor) -> io::Result<()> {
        self.buf.queue(cursor::MoveTo(x, y))?;
        self.buf.queue(SetBackgroundColor(term_color(FIELD_BG)))?;
        if color == EMPTY {
            self.buf.queue(Print(BLANK))?;
        } else {
            self.buf.queue(SetForegroundColor(term_color(palette(color))))?;
            self.buf.queue(Print(BLOCK))?;
        }
        self.buf.queue(ResetColor)?;
        Ok(())
    }

    fn encode_piece(&mut self, piece: &Piece, color: CellColor) -> io::Result<()> {
        for (col, row) in piece.cells() {
            if let Some((x, y)) = self.layout.cell(col, row) {
                self.encode_cell(x, y, color)?;
            }
        }
        Ok(())
    }

    fn encode_field(&mut self, playfield: &Playfield) -> io::Result<()> {
        for row in 0..playfield.rows() as i32 {
            for col in 0..playfield.columns() as i32 {
                let color = playfield.get(col, row).unwrap_or(EMPTY);
                if let Some((x, y)) = self.layout.cell(col, row) {
                    self.encode_cell(x, y, color)?;
                }
            }
        }
        Ok(())
    }

    fn encode_preview(&mut self, piece: &Piece) -> io::Result<()> {
        let bitmap = *piece.bitmap();
        for (i, mask) in bitmap.iter().enumerate() {
            for bit in 0..4u16 {
                let (x, y) = self.layout.preview_cell(i as u16, bit);
                let filled = mask & (0x8u8 >> bit) != 0;
                self.encode_cell(x, y, if filled { piece.color() } else { EMPTY })?;
            }
        }
        Ok(())
    }
}

impl Host for TerminalHost {
    fn clear_background(&mut self) {
        let blank = Playfield::new(self.layout.rows as usize, self.layout.columns as usize);
        let result = self.encode_field(&blank);
        self.record(result);
    }

    fn draw_block(&mut self, piece: &Piece) {
        let result = self.encode_piece(piece, piece.color());
        self.record(result);
    }

    fn clear_block(&mut self, piece: &Piece) {
        let result = self.encode_piece(piece, EMPTY);
        self.record(result);
    }

    fn draw_preview(&mut self, piece: &Piece) {
        let result = self.encode_preview(piece);
        self.record(result);
    }

    fn paint_field(&mut self, playfield: &Playfield) {
        let result = self.encode_field(playfield);
        self.record(result);
    }

    fn log(&mut self, text: &str) {
        self.show_message(text);
    }

    fn random(&mut self, max: u32) -> u32 {
        self.rng.next_range(max)
    }

    fn notify(&mut self, event: GameEvent) {
        if event == GameEvent::GameOver {
            self.show_message("GAME OVER  press any key");
        }
    }
}
