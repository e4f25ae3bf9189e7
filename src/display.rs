/// Presentation layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer, the rendered framebuffer and an
/// immutable view of the game state.  No game logic is performed; this module
/// only translates pixels and HUD text into terminal commands.
///
/// The raster is shown with half-block cells: every cell prints `▀` with the
/// foreground carrying the upper pixel and the background the lower one, so a
/// terminal row holds two raster rows.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{GameState, Outcome};
use crate::raster::{Framebuffer, Pixel};

/// Smallest terminal that still fits HUD, border and a readable play field.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ENEMIES: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   R : Restart   Q : Quit";

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where the raster lands on the terminal, in cells.  `rows` counts terminal
/// rows; the raster is sampled at twice that vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
    /// Terminal size the layout was computed for.
    pub term_cols: u16,
    pub term_rows: u16,
}

impl Viewport {
    /// Largest aspect-preserving play field for a terminal of
    /// `term_cols × term_rows`, or `None` when the terminal is too small.
    ///
    /// Row 0 is the HUD, the last row the controls hint, and a one-cell border
    /// surrounds the field.
    pub fn fit(term_cols: u16, term_rows: u16, raster_w: usize, raster_h: usize) -> Option<Self> {
        if term_cols < MIN_COLS || term_rows < MIN_ROWS || raster_w == 0 || raster_h == 0 {
            return None;
        }
        let avail_cols = (term_cols - 2) as usize;
        let avail_rows = (term_rows - 4) as usize;

        // Half-block pixels are roughly square, so one column per raster
        // column and two samples per row.
        let mut cols = avail_cols;
        let mut rows = (cols * raster_h).div_ceil(raster_w * 2);
        if rows > avail_rows {
            rows = avail_rows;
            cols = (rows * 2 * raster_w / raster_h).min(avail_cols);
        }
        if cols == 0 || rows == 0 {
            return None;
        }

        let left = 1 + (avail_cols - cols) / 2;
        let top = 2 + (avail_rows - rows) / 2;
        Some(Self {
            left: left as u16,
            top: top as u16,
            cols: cols as u16,
            rows: rows as u16,
            term_cols,
            term_rows,
        })
    }
}

fn to_color(p: Pixel) -> Color {
    Color::Rgb {
        r: p.r,
        g: p.g,
        b: p.b,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one complete frame.
pub fn present<W: Write>(
    out: &mut W,
    fb: &Framebuffer,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    draw_field(out, fb, view)?;
    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if let Some(outcome) = state.outcome() {
        draw_game_over(out, state, outcome, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.term_rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

/// Frame around the play field.  Only needs redrawing after a clear.
pub fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let left = view.left - 1;
    let right = view.left + view.cols;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, view.top - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(left, view.top + view.rows))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in view.top..view.top + view.rows {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Raster blit ───────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, fb: &Framebuffer, view: &Viewport) -> std::io::Result<()> {
    let (fw, fh) = (fb.width(), fb.height());
    let cols = view.cols as usize;
    let samples = view.rows as usize * 2;

    // Pixel span covered by output column / sample row `i` of `n`.
    let bounds = |i: usize, n: usize, len: usize| {
        let start = i * len / n;
        (start, ((i + 1) * len / n).max(start + 1))
    };

    let mut last: Option<(Pixel, Pixel)> = None;
    for row in 0..view.rows as usize {
        out.queue(cursor::MoveTo(view.left, view.top + row as u16))?;
        let (y0, y1) = bounds(row * 2, samples, fh);
        let (y2, y3) = bounds(row * 2 + 1, samples, fh);
        for col in 0..cols {
            let (x0, x1) = bounds(col, cols, fw);
            let upper = fb.average(x0, y0, x1, y1);
            let lower = fb.average(x0, y2, x1, y3);

            // Only emit colour changes.
            if last != Some((upper, lower)) {
                out.queue(style::SetForegroundColor(to_color(upper)))?;
                out.queue(style::SetBackgroundColor(to_color(lower)))?;
                last = Some((upper, lower));
            }
            out.queue(Print('▀'))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:<8}", state.score)))?;

    // Enemies remaining — right
    let remaining = format!("Enemies: {:>3}", state.enemies_remaining());
    let rx = view
        .term_cols
        .saturating_sub(remaining.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
    out.queue(Print(&remaining))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.term_rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    // Clipped so narrow terminals never wrap (and scroll) on the last row.
    let hint: String = CONTROLS_HINT
        .chars()
        .take(view.term_cols.saturating_sub(2) as usize)
        .collect();
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    outcome: Outcome,
    view: &Viewport,
) -> std::io::Result<()> {
    let (banner, banner_color) = match outcome {
        Outcome::Won => ("║     YOU  WIN!      ║", Color::Green),
        Outcome::Lost => ("║     GAME  OVER     ║", Color::Red),
    };
    let score_line = format!("Final Score: {:>6}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", banner_color),
        (banner, banner_color),
        ("╚════════════════════╝", banner_color),
        (score_line.as_str(), Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.left + view.cols / 2;
    let start_row = (view.top + view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(Print(*msg))?;
    }
    out.queue(style::ResetColor)?;

    Ok(())
}
