use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};

use alien_invaders::config::GameConfig;
use alien_invaders::display;
use alien_invaders::input::{Key, KeySnapshot};
use alien_invaders::session::Session;

#[derive(Parser, Debug)]
#[command(name = "alien-invaders", about = "Defend the line against descending alien waves")]
struct Cli {
    /// TOML file overriding the default game configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default "info").
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Terminal keys bound to each game key.
fn bindings(key: Key) -> &'static [KeyCode] {
    match key {
        Key::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Key::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        Key::Fire => &[KeyCode::Char(' '), KeyCode::Up],
        Key::Confirm => &[KeyCode::Char('s'), KeyCode::Char('S')],
        Key::Pause => &[KeyCode::Char('p'), KeyCode::Char('P')],
    }
}

fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> KeySnapshot {
    let mut keys = KeySnapshot::none();
    for key in [Key::Left, Key::Right, Key::Fire, Key::Confirm, Key::Pause] {
        keys.set(key, any_held(key_frame, bindings(key), frame));
    }
    keys
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the keys that are still "fresh" (within
/// `HOLD_WINDOW` frames) form the snapshot handed to the session.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    frame_period: Duration,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        session.update(&snapshot(&key_frame, frame), dt);

        let (cols, rows) = terminal::size()?;
        display::render(out, session, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            thread::sleep(frame_period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("cannot open log file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let config = match &cli.config {
        Some(path) => match GameConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load {}: {e}", path.display());
                eprintln!("failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let frame_period = Duration::from_secs(1) / cli.fps.max(1);
    info!("starting at {} fps", cli.fps.max(1));

    match run(config, frame_period) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("terminal error: {e}");
            eprintln!("terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: GameConfig, frame_period: Duration) -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut session = Session::new(config);
    let result = game_loop(&mut out, &mut session, &rx, frame_period);
    info!("session ended on wave {} with score {}", session.wave_number(), session.score());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
