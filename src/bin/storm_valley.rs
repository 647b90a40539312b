//! Storm Valley - Headless Simulation Driver
//!
//! Generates a world and steps it with a scripted input sequence, logging
//! a summary every second of simulated time. Useful for profiling and for
//! eyeballing the simulation without a renderer.
//!
//! Run with: `cargo run --release --bin storm_valley -- [options]`
//!
//! Options:
//! - `--seed N`: World seed (default: 42)
//! - `--frames N`: Frames to simulate (default: 1800)
//! - `--config PATH`: JSON world configuration
//! - `--regenerate-every N`: Regenerate with seed + 1 every N frames
//!
//! Set `RUST_LOG=debug` to see lightning and landing events.

use std::path::PathBuf;
use std::time::Instant;

use log::{error, info};

use storm_valley_engine::input::{KeyCode, KeyboardState};
use storm_valley_engine::{ConfigError, World, WorldConfig};

const FRAME_DELTA: f64 = 1.0 / 60.0;
const SUMMARY_INTERVAL: u64 = 60;

struct Options {
    seed: u64,
    frames: u64,
    config: Option<PathBuf>,
    regenerate_every: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 42,
            frames: 1800,
            config: None,
            regenerate_every: None,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} expects a value"))
        };
        match arg.as_str() {
            "--seed" => {
                options.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("--seed: {e}"))?;
            }
            "--frames" => {
                options.frames = value("--frames")?
                    .parse()
                    .map_err(|e| format!("--frames: {e}"))?;
            }
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--regenerate-every" => {
                let every: u64 = value("--regenerate-every")?
                    .parse()
                    .map_err(|e| format!("--regenerate-every: {e}"))?;
                options.regenerate_every = (every > 0).then_some(every);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

/// Feeds the key state a looping script: walk forward, tap left now and
/// then, jump every few seconds, back off briefly, and drag the camera for
/// a moment every ten seconds.
fn script_keys(frame: u64, keys: &mut KeyboardState) {
    let phase = frame % 600;
    keys.handle_key(KeyCode::ArrowUp, phase < 400);
    keys.handle_key(KeyCode::ArrowDown, (500..520).contains(&phase));
    keys.handle_key(KeyCode::ArrowLeft, phase % 90 < 10);
    keys.handle_key(KeyCode::Space, phase % 150 == 0);
    keys.set_pointer_drag((540..550).contains(&phase));
}

fn load_config(path: Option<&PathBuf>) -> Result<WorldConfig, ConfigError> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            WorldConfig::from_json_file(path)
        }
        None => Ok(WorldConfig::default()),
    }
}

fn run(options: Options) -> Result<(), ConfigError> {
    let config = load_config(options.config.as_ref())?;

    let started = Instant::now();
    let mut world = World::generate(options.seed, config)?;
    info!("World generated in {:.1} ms", started.elapsed().as_secs_f64() * 1000.0);

    let mut keys = KeyboardState::new();
    let mut seed = options.seed;
    let mut jumps = 0u64;
    let mut landings = 0u64;
    let mut flashes = 0u64;
    let mut was_lit = false;
    let started = Instant::now();

    for frame in 1..=options.frames {
        if let Some(every) = options.regenerate_every {
            if frame % every == 0 {
                seed = seed.wrapping_add(1);
                world.regenerate(seed);
            }
        }

        script_keys(frame, &mut keys);
        let out = world.step_frame(FRAME_DELTA, &keys.intent());
        jumps += u64::from(out.player.just_jumped);
        landings += u64::from(out.player.just_landed);
        let lit = !out.strikes.is_empty();
        if lit && !was_lit {
            flashes += 1;
        }
        was_lit = lit;

        if frame % SUMMARY_INTERVAL == 0 {
            let visible = out.rain.iter().filter(|p| p.active).count();
            let p = out.player.position;
            info!(
                "t={:6.2}s rain {:5}/{} strikes {} ambient {:.2} water {} player ({:7.2}, {:5.2}, {:7.2}) yaw {:5.2}{}",
                out.time,
                visible,
                out.rain.len(),
                out.strikes.len(),
                out.ambient_light,
                out.water.len(),
                p.x,
                p.y,
                p.z,
                out.player.yaw,
                if out.camera.manual { " [manual camera]" } else { "" }
            );
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    info!(
        "Simulated {} frames in {:.2}s ({:.0} fps): {} jumps, {} landings, {} flashes",
        options.frames,
        elapsed,
        options.frames as f64 / elapsed.max(f64::EPSILON),
        jumps,
        landings,
        flashes
    );

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            error!("{message}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        error!("{e}");
        std::process::exit(1);
    }
}
