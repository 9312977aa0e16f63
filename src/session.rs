//! Top-level game flow: sequences waves and lives across a session.
//!
//! ```text
//!  INACTIVE ──confirm──▶ NEWWAVE ──▶ ACTIVE ──ship lost, lives left──▶ PAUSED
//!                          ▲           │  ▲                              │
//!                          │           │  └──── CONTINUE ◀──confirm──────┘
//!                          │           │
//!                          └─confirm── COMPLETE ◀── cleared / breached / last life
//! ```
//!
//! NEWWAVE and CONTINUE last for part of one frame only.  The pause key moves
//! ACTIVE to PAUSED directly.

use std::fmt;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::entities::Ship;
use crate::input::{Key, KeyInput};
use crate::scene::{Drawable, LabelStyle};
use crate::wave::Wave;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    NewWave,
    Active,
    Paused,
    Continue,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveResult {
    Win,
    Lose,
}

/// Message shown while the game waits for the confirm key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Start,
    Continue,
    NextWave,
    GameOver,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Prompt::Start => "Press 's' to start",
            Prompt::Continue => "Press 's' to continue",
            Prompt::NextWave => "Press 's' for next wave",
            Prompt::GameOver => "Game over. Press 's' to play again",
        };
        f.write_str(text)
    }
}

const PAUSE_HINT: &str = "Press 'p' to pause";

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    rng: StdRng,
    state: SessionState,
    wave: Option<Wave>,
    wave_number: u32,
    lives: u32,
    score: u32,
    /// Confirm key state from the previous frame, for edge detection.
    confirm_was_down: bool,
    result: Option<WaveResult>,
    prompt: Option<Prompt>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Session driven by a caller-supplied RNG (seed it for reproducible play).
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        if let Err(e) = config.validate() {
            panic!("session built from an invalid configuration: {e}");
        }
        let lives = config.ship.lives;
        Self {
            config,
            rng,
            state: SessionState::Inactive,
            wave: None,
            wave_number: 1,
            lives,
            score: 0,
            confirm_was_down: false,
            result: None,
            prompt: Some(Prompt::Start),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn result(&self) -> Option<WaveResult> {
        self.result
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn wave_mut(&mut self) -> Option<&mut Wave> {
        self.wave.as_mut()
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_label(&self) -> String {
        format!("Lives: {}", self.lives)
    }

    pub fn wave_label(&self) -> String {
        format!("Wave {}", self.wave_number)
    }

    // ── Per-frame step ───────────────────────────────────────────────────────

    /// Advance one frame: apply key edges, then run whichever state we end up in.
    pub fn update(&mut self, input: &impl KeyInput, dt: f32) {
        self.apply_input(input);

        if self.state != SessionState::Inactive {
            self.prompt = None;
        }

        if self.state == SessionState::NewWave {
            self.wave = Some(Wave::new(
                &self.config,
                self.wave_number,
                self.lives,
                self.score,
                &mut self.rng,
            ));
            self.state = SessionState::Active;
            self.result = None;
            info!("wave {} started (lives {}, score {})", self.wave_number, self.lives, self.score);
        }

        if self.state == SessionState::Active {
            if let Some(wave) = self.wave.as_mut() {
                wave.update(input, dt, &mut self.rng);
                self.score = wave.score();
            }
            self.check_wave();
        }

        match self.state {
            SessionState::Paused => self.prompt = Some(Prompt::Continue),
            SessionState::Continue => {
                if let Some(wave) = self.wave.as_mut() {
                    wave.set_ship(Some(Ship::new(&self.config)));
                }
                self.state = SessionState::Active;
                info!("continuing wave {} with {} lives", self.wave_number, self.lives);
            }
            SessionState::Complete => {
                self.prompt = match self.result {
                    Some(WaveResult::Win) => Some(Prompt::NextWave),
                    _ => Some(Prompt::GameOver),
                };
            }
            _ => {}
        }
    }

    /// Confirm acts on the frame it goes down; pause acts whenever it is held
    /// during play.
    fn apply_input(&mut self, input: &impl KeyInput) {
        let confirm = input.is_key_down(Key::Confirm);
        let pressed = confirm && !self.confirm_was_down;

        if pressed {
            match self.state {
                SessionState::Inactive => self.state = SessionState::NewWave,
                SessionState::Paused => self.state = SessionState::Continue,
                SessionState::Complete => {
                    if self.result == Some(WaveResult::Lose) {
                        self.reset();
                    }
                    self.state = SessionState::NewWave;
                }
                _ => {}
            }
        }

        if input.is_key_down(Key::Pause) && self.state == SessionState::Active {
            self.state = SessionState::Paused;
            info!("paused");
        }

        self.confirm_was_down = confirm;
    }

    fn reset(&mut self) {
        self.wave_number = 1;
        self.lives = self.config.ship.lives;
        self.score = 0;
    }

    /// Ship loss is checked before the formation.
    fn check_wave(&mut self) {
        let Some(wave) = &self.wave else {
            return;
        };
        let (has_ship, cleared, breached) = (wave.has_ship(), wave.is_cleared(), wave.is_breached());

        if !has_ship && self.lives >= 2 {
            self.lives -= 1;
            self.state = SessionState::Paused;
            info!("ship lost, {} lives left", self.lives);
        } else if !has_ship {
            self.lives = 0;
            self.complete(WaveResult::Lose);
        } else if cleared {
            self.wave_number += 1;
            self.complete(WaveResult::Win);
        } else if breached {
            self.complete(WaveResult::Lose);
        }
    }

    fn complete(&mut self, result: WaveResult) {
        self.state = SessionState::Complete;
        self.result = Some(result);
        info!("wave complete: {:?}, score {}", result, self.score);
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Everything to draw for the current frame, back to front.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::new();
        let (w, h) = (self.config.screen.width, self.config.screen.height);

        if let Some(prompt) = self.prompt {
            out.push(Drawable::label(prompt.to_string(), w / 2.0, h / 2.0, LabelStyle::Prompt));
            if self.result == Some(WaveResult::Lose) {
                out.push(Drawable::label(self.score_label(), 80.0, h - 80.0, LabelStyle::Hud));
            }
            if self.state == SessionState::Inactive {
                out.push(Drawable::label(PAUSE_HINT, w / 2.0, h / 2.0 - 40.0, LabelStyle::Hint));
            }
        }

        if matches!(self.state, SessionState::Active | SessionState::Paused) {
            if let Some(wave) = &self.wave {
                wave.draw(&mut out);
            }
            out.push(Drawable::label(self.lives_label(), w - 60.0, h - 80.0, LabelStyle::Hud));
            out.push(Drawable::label(self.wave_label(), w / 2.0, h - 80.0, LabelStyle::Hud));
            out.push(Drawable::label(self.score_label(), 80.0, h - 80.0, LabelStyle::Hud));
        }

        out
    }
}
