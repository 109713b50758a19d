mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use galaga_next::audio::{AudioSink, BellAudio, LogAudio};
use galaga_next::compute::{init_state, start_game, tick};
use galaga_next::config::Config;
use galaga_next::entities::GamePhase;
use galaga_next::input::InputState;
use galaga_next::score_store::{
    load_or_zero, record_high_score, FileScoreStore, HighScoreStore, MemoryScoreStore,
};
use galaga_next::snapshot::Snapshot;

use display::{Starfield, Viewport};

const STAR_COUNT: usize = 100;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "galaga_next", about = "Terminal arcade shooter with boss waves")]
struct Cli {
    /// Config file (TOML).  Defaults to <config dir>/galaga_next/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Fixed RNG seed, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept.
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Where logs are written.  The terminal is the game screen, so logs
    /// never go to stdout.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long)]
    no_save: bool,

    /// Ring the terminal bell on explosions.
    #[arg(long)]
    bell: bool,
}

impl Cli {
    fn into_config(self) -> Result<(Config, bool)> {
        let mut cfg = match self.config.or_else(Config::default_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.score_file.is_some() {
            cfg.score_file = self.score_file;
        }
        if self.log_file.is_some() {
            cfg.log_file = self.log_file;
        }
        cfg.bell |= self.bell;
        Ok((cfg, self.no_save))
    }
}

fn init_logging(cfg: &Config) -> Result<()> {
    let path = cfg.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|&k| is_held(key_frame, k, frame, window))
}

fn read_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, window: u64) -> InputState {
    InputState {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
            window,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
            window,
        ),
        fire: is_held(key_frame, KeyCode::Char(' '), frame, window),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame of the last press/repeat for every
/// key, and build one `InputState` per frame from the keys still "fresh".
/// Terminals with keyboard enhancement report releases and drop keys at
/// once; classic terminals let keys expire after `hold_window` frames of
/// silence, which is shorter than the OS repeat interval.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &Config,
    store: &mut dyn HighScoreStore,
    audio: &mut dyn AudioSink,
    rng: &mut StdRng,
) -> Result<()> {
    let mut state = init_state(load_or_zero(&*store));
    let mut saved_high_score = state.high_score;
    let mut stars = Starfield::new(STAR_COUNT, rng);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let frame_len = cfg.frame_duration();
    let clock = Instant::now();
    let mut frame: u64 = 0;

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
                            return Ok(())
                        }
                        KeyCode::Char(' ') | KeyCode::Enter if state.phase == GamePhase::Start => {
                            start_game(&mut state)
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.phase == GamePhase::GameOver =>
                        {
                            start_game(&mut state)
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

        // ── Simulate ──────────────────────────────────────────────────────────
        let input = read_input(&key_frame, frame, cfg.hold_window);
        let now = clock.elapsed().as_millis() as u64;
        let sounds = tick(&mut state, &input, now, rng);
        audio.play_all(&sounds);
        stars.scroll();

        if state.high_score > saved_high_score {
            if let Err(err) = record_high_score(store, state.high_score) {
                tracing::warn!(%err, "failed to save high score");
            }
            saved_high_score = state.high_score;
        }

        // ── Draw ──────────────────────────────────────────────────────────────
        audio.drain_to(&mut *out)?;
        let (cols, rows) = terminal::size()?;
        display::render(
            out,
            &Snapshot::capture(&state, now),
            &stars,
            Viewport { cols, rows },
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let (cfg, no_save) = Cli::parse().into_config()?;
    init_logging(&cfg)?;

    let seed = cfg.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, fps = cfg.fps, "starting");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut store: Box<dyn HighScoreStore> = if no_save {
        Box::new(MemoryScoreStore::default())
    } else {
        Box::new(FileScoreStore::new(cfg.score_path()))
    };
    let mut audio: Box<dyn AudioSink> = if cfg.bell {
        Box::new(BellAudio::new())
    } else {
        Box::new(LogAudio)
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(
        &mut out,
        &rx,
        &cfg,
        store.as_mut(),
        audio.as_mut(),
        &mut rng,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}
