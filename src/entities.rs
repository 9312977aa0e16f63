//! Game entity types: the ship, the aliens and the laser bolts.
//!
//! Entities are positioned rectangles anchored at their center.  The only
//! behaviour they carry is movement and collision against bolts.

use crate::config::GameConfig;
use crate::scene::AssetId;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.height / 2.0
    }

    /// Inclusive on every edge.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px <= self.right() && py >= self.bottom() && py <= self.top()
    }

    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.right(), self.top()),
            (self.right(), self.bottom()),
            (self.left(), self.top()),
            (self.left(), self.bottom()),
        ]
    }
}

/// Anything a bolt can hit.
pub trait Hitbox {
    fn bounds(&self) -> Rect;

    /// True iff one of the bolt's four corners lies inside `bounds()`.
    ///
    /// Only corners are sampled: a bolt that is larger than the entity in both
    /// directions can cover it completely without registering a hit.
    fn collides(&self, bolt: &Bolt) -> bool {
        let bounds = self.bounds();
        bolt.bounds()
            .corners()
            .iter()
            .any(|&(cx, cy)| bounds.contains(cx, cy))
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Ship {
    /// A fresh ship, centered horizontally at the configured bottom.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.screen.width / 2.0,
            y: config.ship.bottom,
            width: config.ship.width,
            height: config.ship.height,
        }
    }

    /// Translate horizontally, keeping the whole hull on screen.
    pub fn move_by(&mut self, dx: f32, screen_width: f32) {
        let half = self.width / 2.0;
        self.x = (self.x + dx).clamp(half, (screen_width - half).max(half));
    }

    /// Where a player bolt is spawned.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x, self.y + self.height)
    }

    pub fn image(&self) -> AssetId {
        AssetId("ship.png")
    }
}

impl Hitbox for Ship {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// Visual and scoring tier of an alien.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlienRank {
    Top,
    Middle,
    Bottom,
}

impl AlienRank {
    /// Ranks repeat every six rows: one top row, two middle, two bottom, one top.
    pub fn for_row(row: usize) -> Self {
        match row % 6 {
            1 | 2 => AlienRank::Middle,
            3 | 4 => AlienRank::Bottom,
            _ => AlienRank::Top,
        }
    }

    /// Score awarded for destroying an alien of this rank.
    pub fn points(&self) -> u32 {
        match self {
            AlienRank::Top => 30,
            AlienRank::Middle => 20,
            AlienRank::Bottom => 10,
        }
    }

    pub fn image(&self) -> AssetId {
        match self {
            AlienRank::Top => AssetId("alien1.png"),
            AlienRank::Middle => AssetId("alien2.png"),
            AlienRank::Bottom => AssetId("alien3.png"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rank: AlienRank,
}

impl Alien {
    pub fn new(x: f32, y: f32, width: f32, height: f32, rank: AlienRank) -> Self {
        Self { x, y, width, height, rank }
    }
}

impl Hitbox for Alien {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltOwner {
    Player,
    Alien,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltColor {
    Blue,
    Red,
}

/// A laser bolt.  Positive velocity travels up (fired by the player),
/// negative travels down (fired by an alien).
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
}

impl Bolt {
    pub fn new(x: f32, y: f32, width: f32, height: f32, velocity: f32) -> Self {
        Self { x, y, width, height, velocity }
    }

    pub fn player(config: &GameConfig, x: f32, y: f32) -> Self {
        let b = &config.bolts;
        Self::new(x, y, b.width, b.height, b.speed)
    }

    pub fn alien(config: &GameConfig, x: f32, y: f32) -> Self {
        let b = &config.bolts;
        Self::new(x, y, b.width, b.height, -b.speed)
    }

    pub fn owner(&self) -> BoltOwner {
        if self.velocity > 0.0 {
            BoltOwner::Player
        } else {
            BoltOwner::Alien
        }
    }

    pub fn is_player_bolt(&self) -> bool {
        self.owner() == BoltOwner::Player
    }

    pub fn color(&self) -> BoltColor {
        match self.owner() {
            BoltOwner::Player => BoltColor::Blue,
            BoltOwner::Alien => BoltColor::Red,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move one frame along the bolt's velocity.
    pub fn advance(&mut self) {
        self.y += self.velocity;
    }

    /// True once the bolt has left `[0, screen_height]` entirely.
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        let bounds = self.bounds();
        bounds.bottom() > screen_height || bounds.top() < 0.0
    }
}
