use alien_invaders::config::GameConfig;
use alien_invaders::entities::{Alien, AlienRank};
use alien_invaders::formation::Formation;

/// Build a formation from a picture: `#` is an alien, `.` an empty slot.
/// Slot centers sit on a 50-unit grid, row 0 at the top.
fn grid(rows: &[&str]) -> Formation {
    let columns = rows[0].len();
    let mut slots = Vec::new();
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            slots.push((ch == '#').then(|| {
                Alien::new(
                    50.0 * (c as f32 + 1.0),
                    500.0 - 50.0 * r as f32,
                    30.0,
                    30.0,
                    AlienRank::for_row(r),
                )
            }));
        }
    }
    Formation::from_slots(rows.len(), columns, slots)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_formation_is_full() {
    let config = GameConfig::default();
    let f = Formation::new(&config);
    assert_eq!(f.rows(), 5);
    assert_eq!(f.columns(), 12);
    assert_eq!(f.alien_count(), 60);
    assert!(!f.is_empty());
}

#[test]
fn new_formation_ranks_by_row() {
    let f = Formation::new(&GameConfig::default());
    assert_eq!(f.get(0, 0).map(|a| a.rank), Some(AlienRank::Top));
    assert_eq!(f.get(2, 5).map(|a| a.rank), Some(AlienRank::Middle));
    assert_eq!(f.get(4, 11).map(|a| a.rank), Some(AlienRank::Bottom));
}

#[test]
#[should_panic]
fn from_slots_rejects_wrong_slot_count() {
    Formation::from_slots(2, 2, vec![None, None, None]);
}

#[test]
#[should_panic]
fn from_slots_rejects_zero_rows() {
    Formation::from_slots(0, 3, Vec::new());
}

// ── Emptiness ─────────────────────────────────────────────────────────────────

#[test]
fn clearing_is_terminal() {
    let mut f = grid(&["#.", ".#"]);
    assert!(f.clear(0, 0).is_some());
    assert!(f.get(0, 0).is_none());
    assert!(f.clear(0, 0).is_none());
    assert!(!f.is_empty());

    f.clear(1, 1);
    assert!(f.is_empty());
    assert_eq!(f.alien_count(), 0);
}

#[test]
fn occupied_is_row_major() {
    let f = grid(&[".#", "#."]);
    let slots: Vec<(usize, usize)> = f.occupied().map(|(r, c, _)| (r, c)).collect();
    assert_eq!(slots, vec![(0, 1), (1, 0)]);
}

// ── Column queries ────────────────────────────────────────────────────────────

#[test]
fn leftmost_and_rightmost_skip_empty_columns() {
    let f = grid(&[
        "..#..",
        ".#...",
        "...#.",
    ]);
    assert_eq!(f.leftmost_occupied_column(), Some(1));
    assert_eq!(f.rightmost_occupied_column(), Some(3));
    assert!(!f.is_column_occupied(0));
    assert!(f.is_column_occupied(2));
}

#[test]
fn column_queries_on_empty_formation() {
    let f = grid(&["..", ".."]);
    assert_eq!(f.leftmost_occupied_column(), None);
    assert_eq!(f.rightmost_occupied_column(), None);
    assert_eq!(f.bottom_non_empty_row(), None);
    assert_eq!(f.bottom_edge(), None);
}

#[test]
fn sample_from_column_direction() {
    let f = grid(&[
        ".#",
        "##",
        ".#",
        "#.",
    ]);
    assert_eq!(f.sample_from_column(1, true).map(|(r, _)| r), Some(2));
    assert_eq!(f.sample_from_column(1, false).map(|(r, _)| r), Some(0));
    assert_eq!(f.sample_from_column(0, true).map(|(r, _)| r), Some(3));
    assert_eq!(f.sample_from_column(0, false).map(|(r, _)| r), Some(1));
}

// ── Row queries ───────────────────────────────────────────────────────────────

#[test]
fn bottom_non_empty_row_skips_cleared_rows() {
    let mut f = grid(&[
        "##",
        "#.",
        ".#",
    ]);
    assert_eq!(f.bottom_non_empty_row(), Some(2));
    f.clear(2, 1);
    assert_eq!(f.bottom_non_empty_row(), Some(1));
}

#[test]
fn bottom_edge_uses_lowest_row() {
    let f = grid(&[
        "##",
        ".#",
    ]);
    // row 1 center y = 450, half height 15
    assert_eq!(f.bottom_edge(), Some(435.0));
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn shift_moves_every_occupant() {
    let mut f = grid(&["#.", ".#"]);
    f.shift(16.0, -16.0);
    let a = f.get(0, 0).expect("occupied");
    let b = f.get(1, 1).expect("occupied");
    assert_eq!((a.x, a.y), (66.0, 484.0));
    assert_eq!((b.x, b.y), (116.0, 434.0));
    assert!(f.get(0, 1).is_none());
}
