mod script;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use engine::{Level, SimConfig, SimEvent, Simulation, constants::TICKS_PER_SECOND};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Headless side-scroller simulation runner", long_about = None)]
struct Args {
    // Level layout (JSON); the built-in demo level when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,

    // Simulation config (JSON); defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    // Number of ticks to run
    #[arg(short, long, default_value_t = 900)]
    ticks: u64,

    // Override the config's random seed
    #[arg(long)]
    seed: Option<u64>,

    // Pace ticks at 30 Hz instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(feature = "json")]
fn load_inputs(args: &Args) -> Result<(SimConfig, Level)> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let level = match &args.level {
        Some(path) => Level::load(path)?,
        None => Level::demo(),
    };
    Ok((config, level))
}

#[cfg(not(feature = "json"))]
fn load_inputs(args: &Args) -> Result<(SimConfig, Level)> {
    anyhow::ensure!(
        args.config.is_none() && args.level.is_none(),
        "loading files needs the `json` feature"
    );
    Ok((SimConfig::default(), Level::demo()))
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (mut config, level) = load_inputs(&args)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let mut sim = Simulation::new(config, &level)?;
    info!("starting simulation for {} ticks (seed {:#x})", args.ticks, config.seed);

    let tick_duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND);
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut removed_total = 0usize;
    for frame in 0..args.ticks {
        if args.realtime {
            interval.tick().await;
        }

        let update_start = Instant::now();
        let report = sim.step(&script::demo_input(frame));
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        removed_total += report.removed.len();
        for event in sim.drain_events() {
            if let SimEvent::Died { entity, kind } = event {
                info!("tick {}: {kind:?} {entity} died", report.tick);
            }
        }

        if report.terminal {
            info!("player down at tick {}", report.tick);
            break;
        }
    }

    for view in sim.views() {
        info!(
            "{:?} at ({:.0}, {:.0}) {:?}, health {}/{}",
            view.kind, view.position.x, view.position.y, view.state, view.health, view.max_health
        );
    }
    info!(
        "finished at tick {}: score {}, {} entities removed, camera offset {:.0}{}",
        sim.tick(),
        sim.score(),
        removed_total,
        sim.camera().offset,
        if sim.camera().phase() { " (arena)" } else { "" }
    );
    Ok(())
}
