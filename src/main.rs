//! Flipper Pinball headless runner
//!
//! Plays an autopiloted session against the simulation and prints the final
//! snapshot as JSON. Useful for tuning tables without a renderer.
//!
//! Example:
//!   RUST_LOG=info cargo run -- --frames 7200 --seed 42 --snapshot-every 600

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use flipper_pinball::sim::{GameEvent, GameState, Table, autoplay};
use flipper_pinball::{FrameScheduler, InputTracker, Settings, Snapshot, TimingMode};

/// Host frame length the runner pretends to render at
const HOST_FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a headless pinball session", long_about = None)]
struct Args {
    /// Settings JSON (table layout, tuning, timing)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Host frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Tick at a fixed rate instead of once per host frame
    #[arg(long)]
    fixed_hz: Option<f32>,
    /// Log a status line every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,
    /// Keep playing after game over by restarting
    #[arg(long)]
    endless: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // A missing or invalid config file is logged and replaced by defaults
    let mut settings = Settings::load_or_default(args.config.as_deref());
    if let Some(hz) = args.fixed_hz {
        if !(hz.is_finite() && hz > 0.0) {
            bail!("--fixed-hz must be a positive finite rate, got {}", hz);
        }
        settings.timing = TimingMode::Fixed { hz };
    }

    if args.print_config {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    let seed = settings.effective_seed(args.seed);
    let table = &settings.table;
    let mut state = GameState::new(table, seed);
    let mut input = InputTracker::new();
    let mut scheduler = FrameScheduler::new(settings.timing, settings.max_substeps);
    log::info!(
        "Flipper Pinball starting (seed {}, timing {:?}, {} frames)",
        seed,
        scheduler.mode(),
        args.frames
    );

    let mut games_played = 0u32;
    let mut best_score = 0u64;

    for frame in 0..args.frames {
        apply_autopilot(&mut input, &state, table);

        let report = scheduler.advance(&mut state, table, &mut input, HOST_FRAME_DT);
        for event in &report.events {
            match event {
                GameEvent::GameOver { final_score } => {
                    games_played += 1;
                    best_score = best_score.max(*final_score);
                    log::info!("Game {} over at frame {}: {}", games_played, frame, final_score);
                }
                GameEvent::BallDrained { remaining } => {
                    log::info!("Drain at frame {}, {} balls left", frame, remaining)
                }
                other => log::debug!("frame {}: {:?}", frame, other),
            }
        }

        if args.snapshot_every > 0 && frame % args.snapshot_every == 0 {
            log::info!("{}", Snapshot::capture(&state, table).status_line());
        }

        if !state.running {
            if args.endless {
                input.restart_clicked();
            } else {
                break;
            }
        }
    }

    best_score = best_score.max(state.score);
    log::info!(
        "Session done: {} finished game(s), best score {}",
        games_played,
        best_score
    );

    let snapshot = Snapshot::capture(&state, table);
    let json = serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?;
    println!("{}", json);
    Ok(())
}

/// Translate the autopilot's choice into the key events a player would send
fn apply_autopilot(input: &mut InputTracker, state: &GameState, table: &Table) {
    let wanted = autoplay::drive(state, table);
    let held = input.peek();

    if wanted.left != held.left {
        if wanted.left {
            input.key_down("ArrowLeft");
        } else {
            input.key_up("ArrowLeft");
        }
    }
    if wanted.right != held.right {
        if wanted.right {
            input.key_down("ArrowRight");
        } else {
            input.key_up("ArrowRight");
        }
    }
    if wanted.launch_requested {
        input.key_down("Space");
    }
}
