//! Alien Invaders: a frame-stepped arcade shooter.
//!
//! The library holds the whole simulation (`wave`, `session`) plus the data it
//! works on.  `display` and the binary are the terminal platform layer.

pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod scene;
pub mod session;
pub mod wave;
