use alien_invaders::config::GameConfig;
use alien_invaders::entities::{Alien, AlienRank, Bolt};
use alien_invaders::formation::Formation;
use alien_invaders::input::{Key, KeySnapshot};
use alien_invaders::scene::Drawable;
use alien_invaders::session::{Prompt, Session, SessionState, WaveResult};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_session(config: GameConfig) -> Session {
    Session::with_rng(config, StdRng::seed_from_u64(42))
}

fn idle() -> KeySnapshot {
    KeySnapshot::none()
}

fn holding(key: Key) -> KeySnapshot {
    KeySnapshot::none().with(key)
}

/// Tap confirm: press on one frame, release on the next.
fn tap_confirm(session: &mut Session) {
    session.update(&holding(Key::Confirm), 0.0);
    session.update(&idle(), 0.0);
}

fn started(config: GameConfig) -> Session {
    let mut session = make_session(config);
    tap_confirm(&mut session);
    session
}

/// Put an alien bolt right on top of the (freshly spawned) ship.
fn shoot_ship(session: &mut Session) {
    let config = session.config().clone();
    let wave = session.wave_mut().expect("wave in play");
    let x = wave.ship().map(|s| s.x).expect("ship present");
    wave.push_bolt(Bolt::alien(&config, x, 50.0));
    session.update(&idle(), 0.0);
}

fn clear_formation(session: &mut Session) {
    let formation = session.wave_mut().expect("wave in play").formation_mut();
    for row in 0..formation.rows() {
        for col in 0..formation.columns() {
            formation.clear(row, col);
        }
    }
}

fn labels(session: &Session) -> Vec<String> {
    session
        .drawables()
        .into_iter()
        .filter_map(|d| match d {
            Drawable::Label { text, .. } => Some(text),
            _ => None,
        })
        .collect()
}

// ── Start ─────────────────────────────────────────────────────────────────────

#[test]
fn session_starts_inactive() {
    let session = make_session(GameConfig::default());
    assert_eq!(session.state(), SessionState::Inactive);
    assert!(session.wave().is_none());
    assert_eq!(session.wave_number(), 1);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.score(), 0);
    assert_eq!(session.prompt(), Some(Prompt::Start));

    let labels = labels(&session);
    assert!(labels.contains(&"Press 's' to start".to_string()));
    assert!(labels.contains(&"Press 'p' to pause".to_string()));
}

#[test]
fn waits_while_no_key_is_pressed() {
    let mut session = make_session(GameConfig::default());
    for _ in 0..10 {
        session.update(&idle(), 0.016);
    }
    assert_eq!(session.state(), SessionState::Inactive);
    assert!(session.wave().is_none());
}

#[test]
fn confirm_starts_a_full_wave() {
    let mut session = make_session(GameConfig::default());
    session.update(&holding(Key::Confirm), 0.0);
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.prompt(), None);

    let wave = session.wave().expect("wave created");
    assert_eq!(wave.formation().alien_count(), 60);
    assert_eq!(wave.wave_number(), 1);
    assert!(wave.has_ship());

    session.update(&idle(), 0.0);
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn active_frame_draws_wave_and_hud() {
    let session = started(GameConfig::default());
    let labels = labels(&session);
    assert_eq!(labels, vec!["Lives: 3", "Wave 1", "Score: 0"]);
    assert!(session
        .drawables()
        .iter()
        .any(|d| matches!(d, Drawable::Ship { .. })));
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_key_freezes_the_wave() {
    let mut session = started(GameConfig::default());
    session.update(&holding(Key::Pause), 0.0);
    assert_eq!(session.state(), SessionState::Paused);
    assert_eq!(session.prompt(), Some(Prompt::Continue));
    assert_eq!(session.lives(), 3);

    // time passes but the formation does not move
    let before = session.wave().and_then(|w| w.formation().get(0, 0).cloned());
    session.update(&holding(Key::Pause), 5.0);
    session.update(&idle(), 5.0);
    let after = session.wave().and_then(|w| w.formation().get(0, 0).cloned());
    assert_eq!(before, after);
    assert_eq!(session.state(), SessionState::Paused);

    tap_confirm(&mut session);
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.prompt(), None);
    assert!(session.wave().is_some_and(|w| w.has_ship()));
}

// ── Losing lives ──────────────────────────────────────────────────────────────

#[test]
fn ship_loss_with_lives_left_pauses() {
    let mut session = started(GameConfig::default());
    shoot_ship(&mut session);
    assert_eq!(session.state(), SessionState::Paused);
    assert_eq!(session.lives(), 2);
    assert_eq!(session.prompt(), Some(Prompt::Continue));
    assert!(labels(&session).contains(&"Lives: 2".to_string()));

    tap_confirm(&mut session);
    assert_eq!(session.state(), SessionState::Active);
    assert!(session.wave().is_some_and(|w| w.has_ship()));
    // same wave continues
    assert_eq!(session.wave_number(), 1);
}

#[test]
fn losing_every_life_completes_with_loss_then_resets() {
    let mut session = started(GameConfig::default());

    shoot_ship(&mut session);
    tap_confirm(&mut session);
    shoot_ship(&mut session);
    tap_confirm(&mut session);
    assert_eq!(session.lives(), 1);

    shoot_ship(&mut session);
    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!(session.result(), Some(WaveResult::Lose));
    assert_eq!(session.lives(), 0);
    assert_eq!(session.prompt(), Some(Prompt::GameOver));
    assert!(session.wave().is_some_and(|w| !w.formation().is_empty()));

    let labels = labels(&session);
    assert!(labels.contains(&"Game over. Press 's' to play again".to_string()));
    assert!(labels.contains(&"Score: 0".to_string()));

    tap_confirm(&mut session);
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.wave_number(), 1);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.score(), 0);
    assert_eq!(session.result(), None);
    assert_eq!(session.wave().map(|w| w.formation().alien_count()), Some(60));
}

#[test]
fn held_confirm_does_not_restart() {
    let mut config = GameConfig::default();
    config.ship.lives = 1;
    let mut session = started(config.clone());

    let wave = session.wave_mut().expect("wave in play");
    wave.push_bolt(Bolt::alien(&config, 400.0, 50.0));
    // confirm goes down on the losing frame and stays down
    session.update(&holding(Key::Confirm), 0.0);
    assert_eq!(session.state(), SessionState::Complete);
    session.update(&holding(Key::Confirm), 0.0);
    session.update(&holding(Key::Confirm), 0.0);
    assert_eq!(session.state(), SessionState::Complete);

    session.update(&idle(), 0.0);
    assert_eq!(session.state(), SessionState::Complete);
    tap_confirm(&mut session);
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn ship_loss_is_checked_before_clearing() {
    let mut session = started(GameConfig::default());
    clear_formation(&mut session);
    shoot_ship(&mut session);
    assert_eq!(session.state(), SessionState::Paused);
    assert_eq!(session.lives(), 2);
}

// ── Winning ───────────────────────────────────────────────────────────────────

#[test]
fn clearing_the_wave_wins_and_carries_over() {
    let mut session = started(GameConfig::default());

    // shoot the bottom-left alien (10 points), then clear the rest
    let config = session.config().clone();
    session
        .wave_mut()
        .expect("wave in play")
        .push_bolt(Bolt::player(&config, 32.5, 370.0));
    session.update(&idle(), 0.0);
    assert_eq!(session.score(), 10);

    clear_formation(&mut session);
    session.update(&idle(), 0.0);
    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!(session.result(), Some(WaveResult::Win));
    assert_eq!(session.wave_number(), 2);
    assert_eq!(session.prompt(), Some(Prompt::NextWave));

    tap_confirm(&mut session);
    assert_eq!(session.state(), SessionState::Active);
    let wave = session.wave().expect("next wave");
    assert_eq!(wave.wave_number(), 2);
    assert_eq!(wave.score(), 10);
    assert_eq!(wave.lives(), 3);
    assert_eq!(wave.step_interval(), 0.75);
    assert_eq!(wave.formation().alien_count(), 60);
    assert_eq!(session.score(), 10);
    assert_eq!(session.lives(), 3);
}

// ── Breach ────────────────────────────────────────────────────────────────────

#[test]
fn breach_completes_with_loss() {
    let mut session = started(GameConfig::default());
    *session.wave_mut().expect("wave in play").formation_mut() = Formation::from_slots(
        1,
        1,
        vec![Some(Alien::new(300.0, 110.0, 33.0, 33.0, AlienRank::Bottom))],
    );
    session.update(&idle(), 0.0);
    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!(session.result(), Some(WaveResult::Lose));
    assert_eq!(session.lives(), 3);

    tap_confirm(&mut session);
    assert_eq!(session.wave_number(), 1);
    assert_eq!(session.state(), SessionState::Active);
}
