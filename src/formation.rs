//! The alien formation: a fixed `rows × columns` grid of optional aliens.
//!
//! Row 0 is the top row; higher row indices sit closer to the defense line.
//! Slot indices never change during a wave and a cleared slot is never
//! refilled, so emptiness only accumulates.

use crate::config::GameConfig;
use crate::entities::{Alien, AlienRank};

#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    rows: usize,
    columns: usize,
    /// Row-major.
    slots: Vec<Option<Alien>>,
}

impl Formation {
    /// Full formation in its starting position.
    pub fn new(config: &GameConfig) -> Self {
        let a = &config.aliens;
        let mut slots = Vec::with_capacity(a.rows * a.columns);
        for row in 0..a.rows {
            let rank = AlienRank::for_row(row);
            for col in 0..a.columns {
                let (x, y) = config.alien_origin(row, col);
                slots.push(Some(Alien::new(x, y, a.width, a.height, rank)));
            }
        }
        Self::from_slots(a.rows, a.columns, slots)
    }

    /// Build a formation from an explicit row-major slot list.
    pub fn from_slots(rows: usize, columns: usize, slots: Vec<Option<Alien>>) -> Self {
        assert!(
            rows > 0 && columns > 0,
            "formation needs at least one row and column, got {rows}x{columns}"
        );
        assert_eq!(
            slots.len(),
            rows * columns,
            "slot count does not match {rows}x{columns} formation"
        );
        Self { rows, columns, slots }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "slot ({row}, {col}) outside {}x{} formation",
            self.rows,
            self.columns
        );
        row * self.columns + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        self.slots[self.index(row, col)].as_ref()
    }

    /// Empty a slot, returning the alien that occupied it.
    pub fn clear(&mut self, row: usize, col: usize) -> Option<Alien> {
        let i = self.index(row, col);
        self.slots[i].take()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn alien_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Occupied slots as `(row, col, alien)` in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Alien)> + '_ {
        let columns = self.columns;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|a| (i / columns, i % columns, a)))
    }

    pub fn is_column_occupied(&self, col: usize) -> bool {
        (0..self.rows).any(|row| self.get(row, col).is_some())
    }

    fn is_row_occupied(&self, row: usize) -> bool {
        (0..self.columns).any(|col| self.get(row, col).is_some())
    }

    pub fn leftmost_occupied_column(&self) -> Option<usize> {
        (0..self.columns).find(|&col| self.is_column_occupied(col))
    }

    pub fn rightmost_occupied_column(&self) -> Option<usize> {
        (0..self.columns).rev().find(|&col| self.is_column_occupied(col))
    }

    /// First occupant of `col`, scanning upward from the bottom row when
    /// `from_bottom` is set and downward from the top row otherwise.
    pub fn sample_from_column(&self, col: usize, from_bottom: bool) -> Option<(usize, &Alien)> {
        let find = |row: usize| self.get(row, col).map(|a| (row, a));
        if from_bottom {
            (0..self.rows).rev().find_map(find)
        } else {
            (0..self.rows).find_map(find)
        }
    }

    /// Highest row index that still holds an alien.
    pub fn bottom_non_empty_row(&self) -> Option<usize> {
        (0..self.rows).rev().find(|&row| self.is_row_occupied(row))
    }

    /// Lower edge of the first occupant of the bottom non-empty row.
    pub fn bottom_edge(&self) -> Option<f32> {
        let row = self.bottom_non_empty_row()?;
        (0..self.columns)
            .find_map(|col| self.get(row, col))
            .map(|alien| alien.y - alien.height / 2.0)
    }

    /// Move every occupant by `(dx, dy)`.
    pub fn shift(&mut self, dx: f32, dy: f32) {
        for alien in self.slots.iter_mut().flatten() {
            alien.x += dx;
            alien.y += dy;
        }
    }
}
