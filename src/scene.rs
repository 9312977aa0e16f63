//! Draw-ready view of a frame.
//!
//! The simulation never renders anything itself: after each update it hands
//! the platform layer an ordered list of `Drawable`s.  Images and fonts are
//! named by opaque `AssetId`s that only the renderer interprets.

use crate::entities::{AlienRank, BoltColor, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId(pub &'static str);

/// Font used for every text label.
pub const LABEL_FONT: AssetId = AssetId("Arcade.ttf");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// Large centered message (start, continue, game over).
    Prompt,
    /// Small secondary line under a prompt.
    Hint,
    /// Score, wave and lives counters.
    Hud,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    Ship {
        bounds: Rect,
        image: AssetId,
    },
    Alien {
        bounds: Rect,
        rank: AlienRank,
        image: AssetId,
    },
    Bolt {
        bounds: Rect,
        color: BoltColor,
    },
    DefenseLine {
        y: f32,
        width: f32,
    },
    Label {
        text: String,
        x: f32,
        y: f32,
        style: LabelStyle,
        font: AssetId,
    },
}

impl Drawable {
    pub fn label(text: impl Into<String>, x: f32, y: f32, style: LabelStyle) -> Self {
        Drawable::Label {
            text: text.into(),
            x,
            y,
            style,
            font: LABEL_FONT,
        }
    }
}
