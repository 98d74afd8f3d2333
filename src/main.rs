//! Osmosis Lab - headless diagnostics entry point
//!
//! Runs the simulation core without a renderer and reports how the particle
//! population responds to a scenario.
//!
//! CLI Usage:
//!   cargo run                          # Normal scenario, 600 frames
//!   cargo run -- --scenario drought    # Preset scenarios
//!   cargo run -- -n 2000 --seed 42     # Custom frame count, seeded placement

use anyhow::{bail, Result};
use osmosis_lab::{
    config::Parameters,
    engine::{FrameDriver, ParticleEngine},
    state::{Scenario, Simulation},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Reference canvas dimensions (device-independent pixels)
const CANVAS_WIDTH: f32 = 800.0;
const CANVAS_HEIGHT: f32 = 450.0;

/// Synthetic 60 fps frame time
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Parse CLI arguments
fn parse_args() -> Result<(Scenario, u64, Option<u64>)> {
    let args: Vec<String> = std::env::args().collect();
    let mut scenario = Scenario::Normal;
    let mut frames = 600;
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" | "-s" => {
                i += 1;
                if i < args.len() {
                    scenario = match args[i].to_lowercase().as_str() {
                        "normal" => Scenario::Normal,
                        "drought" => Scenario::Drought,
                        "freshwater" => Scenario::Freshwater,
                        other => bail!("unknown scenario '{}'", other),
                    };
                }
            }
            "-n" | "--frames" => {
                i += 1;
                if i < args.len() {
                    frames = args[i].parse().unwrap_or(600);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = Some(args[i].parse().unwrap_or(0));
                }
            }
            "--help" | "-h" => {
                println!("Osmosis Lab");
                println!();
                println!("Usage: osmosis-lab [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --scenario NAME  normal | drought | freshwater (default: normal)");
                println!("  -n, --frames N       Number of frames to simulate (default: 600)");
                println!("      --seed SEED      Seed particle placement for reproducible runs");
                println!("  -h, --help           Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    Ok((scenario, frames, seed))
}

fn main() -> Result<()> {
    env_logger::init();

    let (scenario, frames, seed) = parse_args()?;

    println!("=== Osmosis Lab - Headless Diagnostics ===\n");

    let params = Parameters::load_or_default();
    let mut simulation = Simulation::new(params.biology.clone());
    simulation.set_scenario(scenario);

    let derived = *simulation.derived();
    println!("Scenario:      {:?}", scenario);
    println!("Concentration: {:.0}%", simulation.concentration());
    println!("Temperature:   {:.0}", simulation.temperature());
    println!("Stomata:       {}", if simulation.stomata_open() { "open" } else { "closed" });
    println!("Cell state:    {:?}", derived.cell_state);
    println!("Net flow:      {:+}", derived.net_flow.signum());
    println!();
    println!("{}", derived.explanation.title);
    println!("{}", derived.explanation.description);

    let mut engine = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            ParticleEngine::with_rng(CANVAS_WIDTH, CANVAS_HEIGHT, params.engine.clone(), &mut rng)
        }
        None => ParticleEngine::new(CANVAS_WIDTH, CANVAS_HEIGHT, params.engine.clone()),
    };

    let initial_inside = engine.inside_count();
    println!("\n--- Running {} frames at 60 fps ---\n", frames);

    let driver = FrameDriver::new();
    let token = driver.token();
    let mut tick: u64 = 0;
    let mut done: u64 = 0;
    let report_every = (frames / 10).max(1);

    driver.run(
        move || {
            let t = tick as f64 * FRAME_MS;
            tick += 1;
            t
        },
        |timestamp| {
            engine.step(
                timestamp,
                simulation.temperature(),
                simulation.net_flow(),
                simulation.cell_state(),
            );

            if done % report_every == 0 {
                log::info!(
                    "frame {}: t={:.0}ms, inside={}/{}",
                    done,
                    timestamp,
                    engine.inside_count(),
                    engine.snapshot().len()
                );
            }

            done += 1;
            if done >= frames {
                token.cancel();
            }
            true
        },
    );

    let final_inside = engine.inside_count();
    engine.stop();

    println!("=== Results ===");
    println!("Frames simulated:  {}", engine.step_count());
    println!("Animation time:    {:.1} s", frames as f64 * FRAME_MS / 1000.0);
    println!("Total molecules:   {}", engine.snapshot().len());
    println!(
        "Inside the cell:   {} -> {} ({:+})",
        initial_inside,
        final_inside,
        final_inside as i64 - initial_inside as i64
    );

    Ok(())
}
