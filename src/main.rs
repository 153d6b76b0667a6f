//! Skyflap - headless runner
//!
//! Plays unattended autopilot runs against the real game loop and prints a
//! JSON summary of each run.
//!
//! Usage:
//!   skyflap [--seed <n>] [--runs <n>] [--high-score-file <path>] [--realtime]

use anyhow::{Context, Result, ensure};
use clap::Parser;
use std::path::PathBuf;

use skyflap::audio::{AudioManager, LogAudio};
use skyflap::consts::MAX_FPS;
use skyflap::platform::{
    AutopilotInput, FileHighScoreStore, FixedClock, FrameClock, HighScoreStore, MemoryHighScoreStore, TimeSource,
};
use skyflap::renderer::LogRenderer;
use skyflap::{App, EffectPolicy, Game, HighScore, Settings, SpawnModel};

#[derive(Parser)]
#[command(name = "skyflap")]
#[command(about = "Skyflap - fly through the gaps; runs autopilot sessions headless")]
struct Args {
    /// Base seed; run N uses seed + N (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs to play before exiting
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Stop after this many frames even if runs remain
    #[arg(long)]
    max_frames: Option<u64>,

    /// Plaintext file holding the best score (kept in memory if omitted)
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// JSON settings file, read at startup and written on changes
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// Disable sound
    #[arg(long)]
    mute: bool,

    /// Pace frames with the wall clock instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Keep one timer per power-up kind instead of a single slot
    #[arg(long)]
    stack_effects: bool,

    /// Spawn power-ups at a fixed rate per second rather than per frame
    #[arg(long)]
    time_scaled_spawns: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    ensure!(args.runs > 0, "--runs must be at least 1");

    let mut settings = match &args.settings_file {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if args.mute {
        settings.sound_enabled = false;
    }
    if args.stack_effects {
        settings.effect_policy = EffectPolicy::Stack;
    }
    if args.time_scaled_spawns {
        settings.spawn_model = SpawnModel::time_scaled_default();
    }

    let mut store: Box<dyn HighScoreStore> = match &args.high_score_file {
        Some(path) => Box::new(FileHighScoreStore::new(path)),
        None => Box::new(MemoryHighScoreStore::default()),
    };
    let high_score = HighScore::load(&mut *store);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Skyflap starting: {} run(s), base seed {}", args.runs, seed);

    let clock: Box<dyn TimeSource> = if args.realtime {
        Box::new(FrameClock::new(MAX_FPS))
    } else {
        Box::new(FixedClock::at_fps(MAX_FPS))
    };

    let game = Game::new(settings, high_score, seed);
    let mut app = App::new(
        game,
        clock,
        Box::new(AutopilotInput::new(args.runs)),
        Box::new(LogRenderer::new()),
        AudioManager::new(Box::new(LogAudio::default())),
        store,
    );
    if let Some(path) = args.settings_file {
        app = app.with_settings_path(path);
    }

    let summary = app.run(args.max_frames);
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
    println!("{json}");
    Ok(())
}
