//! A single wave: the ship, the alien formation, the bolts in flight and the
//! defense line.
//!
//! `update` advances the simulation by one frame.  Outcomes are never
//! returned from it; callers poll `has_ship`, `is_cleared` and `is_breached`
//! (or `status`) afterwards.  All randomness comes through an injected RNG so
//! tests can seed it.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bolt, Hitbox, Ship};
use crate::formation::Formation;
use crate::input::{Key, KeyInput};
use crate::scene::Drawable;

/// Condition of a wave after an update, in the order the session checks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveStatus {
    InProgress,
    ShipLost,
    Cleared,
    Breached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum March {
    Right,
    Down,
    Left,
}

impl March {
    /// Lap phases: right, down, left, down.
    fn for_lap(lap: u32) -> Self {
        match lap % 4 {
            0 => March::Right,
            2 => March::Left,
            _ => March::Down,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Wave {
    config: GameConfig,
    wave_number: u32,
    ship: Option<Ship>,
    formation: Formation,
    /// In fire order.
    bolts: Vec<Bolt>,
    defense_line: f32,
    /// Seconds since the last formation step.
    step_timer: f32,
    step_interval: f32,
    /// Selects the marching direction (see `March::for_lap`).
    lap: u32,
    /// Formation steps since the last alien shot.
    steps: u32,
    /// Steps at which the next alien shot is fired.
    steps_to_fire: u32,
    lives: u32,
    score: u32,
}

impl Wave {
    pub fn new(
        config: &GameConfig,
        wave_number: u32,
        lives: u32,
        score: u32,
        rng: &mut impl Rng,
    ) -> Self {
        if let Err(e) = config.validate() {
            panic!("wave built from an invalid configuration: {e}");
        }
        assert!(wave_number >= 1, "wave numbers start at 1");
        assert!(lives >= 1, "a wave needs at least one life");

        let step_interval = config.step_interval(wave_number);
        debug!("wave {wave_number}: step interval {step_interval:.3}s, lives {lives}, score {score}");

        Self {
            config: config.clone(),
            wave_number,
            ship: Some(Ship::new(config)),
            formation: Formation::new(config),
            bolts: Vec::new(),
            defense_line: config.screen.defense_line,
            step_timer: 0.0,
            step_interval,
            lap: 0,
            steps: 0,
            steps_to_fire: rng.gen_range(1..=config.bolts.max_fire_steps),
            lives,
            score,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn has_ship(&self) -> bool {
        self.ship.is_some()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn defense_line(&self) -> f32 {
        self.defense_line
    }

    pub fn step_interval(&self) -> f32 {
        self.step_interval
    }

    pub fn steps_to_fire(&self) -> u32 {
        self.steps_to_fire
    }

    pub fn is_cleared(&self) -> bool {
        self.formation.is_empty()
    }

    /// True once the lowest aliens' lower edge is at or below the defense line.
    pub fn is_breached(&self) -> bool {
        self.formation
            .bottom_edge()
            .is_some_and(|edge| edge <= self.defense_line)
    }

    pub fn status(&self) -> WaveStatus {
        if !self.has_ship() {
            WaveStatus::ShipLost
        } else if self.is_cleared() {
            WaveStatus::Cleared
        } else if self.is_breached() {
            WaveStatus::Breached
        } else {
            WaveStatus::InProgress
        }
    }

    // ── Mutation outside the frame step ──────────────────────────────────────

    /// Replace (or remove) the ship.  Used to bring a new ship in after a
    /// life is lost.
    pub fn set_ship(&mut self, ship: Option<Ship>) {
        self.ship = ship;
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn push_bolt(&mut self, bolt: Bolt) {
        self.bolts.push(bolt);
    }

    // ── Per-frame step ───────────────────────────────────────────────────────

    /// Advance the simulation by one frame of `dt` seconds.
    pub fn update(&mut self, input: &impl KeyInput, dt: f32, rng: &mut impl Rng) {
        // ── 1. Move the ship ─────────────────────────────────────────────────
        let width = self.config.screen.width;
        let movement = self.config.ship.movement;
        if let Some(ship) = self.ship.as_mut() {
            if input.is_key_down(Key::Left) {
                ship.move_by(-movement, width);
            }
            if input.is_key_down(Key::Right) {
                ship.move_by(movement, width);
            }
        }

        // ── 2. March the formation ───────────────────────────────────────────
        self.step_timer += dt.max(0.0);
        if self.step_timer > self.step_interval && !self.is_cleared() && !self.is_breached() {
            self.march();
        }

        // ── 3. Player fire (one player bolt on screen at a time) ─────────────
        if input.is_key_down(Key::Fire) && !self.bolts.iter().any(Bolt::is_player_bolt) {
            if let Some(ship) = &self.ship {
                let (x, y) = ship.muzzle();
                self.bolts.push(Bolt::player(&self.config, x, y));
            }
        }

        // ── 4. Move bolts, dropping those that left the screen ───────────────
        let height = self.config.screen.height;
        for bolt in &mut self.bolts {
            bolt.advance();
        }
        self.bolts.retain(|b| !b.is_off_screen(height));

        // ── 5. Collisions ────────────────────────────────────────────────────
        self.hit_alien();
        self.hit_ship();

        // ── 6. Alien fire ────────────────────────────────────────────────────
        self.alien_fire(rng);
    }

    /// Take one step in the direction of the current lap phase.  A sideways
    /// step with no room left advances the lap instead, so the next step goes
    /// down.
    fn march(&mut self) {
        let a = &self.config.aliens;
        let (h_sep, v_sep) = (a.h_sep, a.v_sep);
        let right_limit = self.config.screen.width - a.h_sep - a.width;
        let left_limit = a.h_sep + a.width;

        match March::for_lap(self.lap) {
            March::Right => {
                let has_room = self
                    .edge_alien_x(self.formation.rightmost_occupied_column())
                    .is_some_and(|x| x < right_limit);
                if has_room {
                    self.step(h_sep, 0.0);
                } else {
                    self.lap += 1;
                }
            }
            March::Left => {
                let has_room = self
                    .edge_alien_x(self.formation.leftmost_occupied_column())
                    .is_some_and(|x| x > left_limit);
                if has_room {
                    self.step(-h_sep, 0.0);
                } else {
                    self.lap += 1;
                }
            }
            March::Down => {
                self.step(0.0, -v_sep);
                self.lap += 1;
            }
        }
    }

    fn edge_alien_x(&self, col: Option<usize>) -> Option<f32> {
        col.and_then(|c| self.formation.sample_from_column(c, false))
            .map(|(_, alien)| alien.x)
    }

    fn step(&mut self, dx: f32, dy: f32) {
        self.formation.shift(dx, dy);
        self.step_timer = 0.0;
        self.steps += 1;
    }

    /// Resolve at most one player-bolt hit per frame: the first bolt (in fire
    /// order) against the first alien (row-major) it touches.
    fn hit_alien(&mut self) {
        let hit = self
            .bolts
            .iter()
            .enumerate()
            .filter(|(_, bolt)| bolt.is_player_bolt())
            .find_map(|(bi, bolt)| {
                self.formation
                    .occupied()
                    .find(|(_, _, alien)| alien.collides(bolt))
                    .map(|(row, col, _)| (bi, row, col))
            });

        if let Some((bi, row, col)) = hit {
            self.bolts.remove(bi);
            if let Some(alien) = self.formation.clear(row, col) {
                self.score += alien.rank.points();
                debug!(
                    "alien ({row}, {col}) destroyed for {} points, score {}",
                    alien.rank.points(),
                    self.score
                );
            }
        }
    }

    fn hit_ship(&mut self) {
        let Some(ship) = &self.ship else {
            return;
        };
        let hit = self
            .bolts
            .iter()
            .position(|bolt| !bolt.is_player_bolt() && ship.collides(bolt));
        if let Some(bi) = hit {
            self.bolts.remove(bi);
            self.ship = None;
            debug!("ship destroyed in wave {}", self.wave_number);
        }
    }

    /// Fire from the bottom of a random occupied column once enough formation
    /// steps have passed.
    fn alien_fire(&mut self, rng: &mut impl Rng) {
        if self.steps < self.steps_to_fire || self.formation.is_empty() {
            return;
        }

        let columns = self.formation.columns();
        let mut col = rng.gen_range(0..columns);
        while !self.formation.is_column_occupied(col) {
            col = rng.gen_range(0..columns);
        }

        if let Some((row, alien)) = self.formation.sample_from_column(col, true) {
            let bolt = Bolt::alien(&self.config, alien.x, alien.y - alien.height);
            debug!("alien ({row}, {col}) fires");
            self.bolts.push(bolt);
        }
        self.steps = 0;
        self.steps_to_fire = rng.gen_range(1..=self.config.bolts.max_fire_steps);
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Append this wave's entities in draw order.
    pub fn draw(&self, out: &mut Vec<Drawable>) {
        for (_, _, alien) in self.formation.occupied() {
            out.push(Drawable::Alien {
                bounds: alien.bounds(),
                rank: alien.rank,
                image: alien.rank.image(),
            });
        }
        if let Some(ship) = &self.ship {
            out.push(Drawable::Ship {
                bounds: ship.bounds(),
                image: ship.image(),
            });
        }
        out.push(Drawable::DefenseLine {
            y: self.defense_line,
            width: self.config.screen.width,
        });
        for bolt in &self.bolts {
            out.push(Drawable::Bolt {
                bounds: bolt.bounds(),
                color: bolt.color(),
            });
        }
    }
}
