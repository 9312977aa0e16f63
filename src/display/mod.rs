//! Rendering layer: all terminal I/O lives here.
//!
//! `render` receives a writer and an immutable session, asks it for the
//! frame's `Drawable`s and maps game coordinates (y-up, origin bottom-left)
//! onto terminal cells.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{AlienRank, BoltColor, Rect};
use crate::scene::{Drawable, LabelStyle};
use crate::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SHIP: Color = Color::White;
const C_ALIEN_TOP: Color = Color::Red;
const C_ALIEN_MIDDLE: Color = Color::Green;
const C_ALIEN_BOTTOM: Color = Color::Yellow;
const C_BOLT_BLUE: Color = Color::Cyan;
const C_BOLT_RED: Color = Color::Magenta;
const C_DEFENSE_LINE: Color = Color::DarkGrey;
const C_PROMPT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_HUD: Color = Color::Yellow;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps the game screen onto the terminal area inside the border.
struct Viewport {
    game_width: f32,
    game_height: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn first_col(&self) -> u16 {
        1
    }

    fn last_col(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn first_row(&self) -> u16 {
        1
    }

    /// Row above the bottom border.
    fn last_row(&self) -> u16 {
        self.rows.saturating_sub(3).max(1)
    }

    fn col(&self, x: f32) -> u16 {
        let span = (self.last_col() - self.first_col() + 1) as f32;
        let c = (x / self.game_width * span).floor();
        (self.first_col() as f32 + c.max(0.0)).min(self.last_col() as f32) as u16
    }

    fn row(&self, y: f32) -> u16 {
        let span = (self.last_row() - self.first_row() + 1) as f32;
        let r = ((self.game_height - y) / self.game_height * span).floor();
        (self.first_row() as f32 + r.max(0.0)).min(self.last_row() as f32) as u16
    }

    /// Leftmost column for `text` centered on game x-coordinate `x`.
    fn centered(&self, x: f32, text: &str) -> u16 {
        let half = text.chars().count() as u16 / 2;
        self.col(x).saturating_sub(half).max(self.first_col())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `cols × rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let screen = &session.config().screen;
    let view = Viewport {
        game_width: screen.width,
        game_height: screen.height,
        cols,
        rows,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &view)?;

    for drawable in session.drawables() {
        draw(out, &view, &drawable)?;
    }

    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.rows.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw<W: Write>(out: &mut W, view: &Viewport, drawable: &Drawable) -> std::io::Result<()> {
    match drawable {
        Drawable::Ship { bounds, .. } => draw_sprite(out, view, bounds, "/▲\\", C_SHIP),
        Drawable::Alien { bounds, rank, .. } => {
            let (sprite, color) = match rank {
                AlienRank::Top => ("(◉)", C_ALIEN_TOP),
                AlienRank::Middle => ("<▼>", C_ALIEN_MIDDLE),
                AlienRank::Bottom => ("[_]", C_ALIEN_BOTTOM),
            };
            draw_sprite(out, view, bounds, sprite, color)
        }
        Drawable::Bolt { bounds, color } => {
            let (glyph, color) = match color {
                BoltColor::Blue => ("║", C_BOLT_BLUE),
                BoltColor::Red => ("↓", C_BOLT_RED),
            };
            draw_sprite(out, view, bounds, glyph, color)
        }
        Drawable::DefenseLine { y, width } => {
            let from = view.col(0.0);
            let to = view.col(*width);
            out.queue(cursor::MoveTo(from, view.row(*y)))?;
            out.queue(style::SetForegroundColor(C_DEFENSE_LINE))?;
            out.queue(Print("─".repeat((to - from + 1) as usize)))?;
            Ok(())
        }
        Drawable::Label { text, x, y, style: label_style, .. } => {
            let color = match label_style {
                LabelStyle::Prompt => C_PROMPT,
                LabelStyle::Hint => C_HINT,
                LabelStyle::Hud => C_HUD,
            };
            out.queue(cursor::MoveTo(view.centered(*x, text), view.row(*y)))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(text))?;
            Ok(())
        }
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: &Rect,
    sprite: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(view.centered(bounds.x, sprite), view.row(bounds.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Fire   S : Confirm   P : Pause   Q : Quit"))?;
    Ok(())
}
