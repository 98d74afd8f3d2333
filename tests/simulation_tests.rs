//! End-to-end tests for the osmosis simulation core.
//!
//! Exercises the full producer -> consumer pipeline: control inputs flow into
//! the state derivation, whose outputs parameterize the particle engine,
//! which a frame driver advances with monotonic timestamps.

use osmosis_lab::{
    config::{BiologyParameters, EngineParameters, Parameters},
    engine::{FrameDriver, ParticleEngine},
    state::{CellState, DerivedState, NetFlow, Scenario, Simulation},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CANVAS_WIDTH: f32 = 800.0;
const CANVAS_HEIGHT: f32 = 450.0;

fn seeded_engine(seed: u64) -> ParticleEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    ParticleEngine::with_rng(CANVAS_WIDTH, CANVAS_HEIGHT, EngineParameters::default(), &mut rng)
}

/// Run the engine for `frames` frames at a synthetic 60 fps starting at
/// `start_ms`, feeding it the simulation's current derived state each step.
/// Returns the timestamp to resume from.
fn run_frames(engine: &mut ParticleEngine, simulation: &Simulation, start_ms: f64, frames: u64) -> f64 {
    let frame_ms = 1000.0 / 60.0;
    let mut tick = 0u64;
    let mut done = 0u64;

    let driver = FrameDriver::new();
    let token = driver.token();
    driver.run(
        move || {
            let t = start_ms + tick as f64 * frame_ms;
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
            done += 1;
            if done >= frames {
                token.cancel();
            }
            true
        },
    );

    start_ms + frames as f64 * frame_ms
}

// ============================================================================
// State derivation through the control surface
// ============================================================================

#[test]
fn test_state_flow_pairing_never_breaks() {
    let mut sim = Simulation::default();
    for c in 0..=100 {
        for stomata in [false, true] {
            sim.set_concentration(c as f32);
            sim.set_stomata_open(stomata);
            let expected = match sim.cell_state() {
                CellState::Turgid => 1,
                CellState::Flaccid => 0,
                CellState::Plasmolyzed => -1,
            };
            assert_eq!(sim.net_flow().signum(), expected);
        }
    }
}

#[test]
fn test_scenario_sweep() {
    let mut sim = Simulation::default();

    sim.set_scenario(Scenario::Drought);
    assert_eq!(sim.cell_state(), CellState::Plasmolyzed);
    assert_eq!(sim.net_flow(), NetFlow::Outward);

    sim.set_scenario(Scenario::Freshwater);
    assert_eq!(sim.cell_state(), CellState::Turgid);
    assert_eq!(sim.net_flow(), NetFlow::Inward);

    sim.set_scenario(Scenario::Normal);
    assert_eq!(sim.cell_state(), CellState::Flaccid);
    assert_eq!(sim.net_flow(), NetFlow::Equilibrium);
}

#[test]
fn test_derivation_is_idempotent() {
    let params = BiologyParameters::default();
    for c in [0.0, 29.0, 30.0, 34.0, 35.0, 50.0, 65.0, 66.0, 100.0] {
        let a = DerivedState::derive(c, true, &params);
        let b = DerivedState::derive(c, true, &params);
        assert_eq!(a, b, "derivation not idempotent at c={}", c);
    }
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_drought_drains_the_cell() {
    let mut sim = Simulation::default();
    sim.set_scenario(Scenario::Drought);
    let mut engine = seeded_engine(100);

    let before = engine.inside_count();
    run_frames(&mut engine, &sim, 0.0, 600); // 10 s of animation

    assert!(
        engine.inside_count() < before,
        "outward flow should reduce the inside population ({} -> {})",
        before,
        engine.inside_count()
    );
    assert_eq!(engine.snapshot().len(), 100, "particles are never destroyed");
}

#[test]
fn test_freshwater_fills_the_cell() {
    let mut sim = Simulation::default();
    sim.set_scenario(Scenario::Freshwater);
    let mut engine = seeded_engine(101);

    let before = engine.inside_count();
    run_frames(&mut engine, &sim, 0.0, 600);

    assert!(engine.inside_count() > before);
    assert_eq!(engine.snapshot().len(), 100);
}

#[test]
fn test_equilibrium_population_is_stable() {
    let sim = Simulation::default(); // Normal scenario => Equilibrium
    let mut engine = seeded_engine(102);

    run_frames(&mut engine, &sim, 0.0, 1200);

    assert_eq!(engine.inside_count(), 30);
}

#[test]
fn test_parameter_change_mid_run_takes_effect_next_step() {
    let mut sim = Simulation::default();
    let mut engine = seeded_engine(103);

    let resume = run_frames(&mut engine, &sim, 0.0, 60);
    assert_eq!(engine.inside_count(), 30);

    // User drags the concentration slider down between frames
    sim.set_concentration(10.0);
    assert_eq!(sim.cell_state(), CellState::Turgid);

    run_frames(&mut engine, &sim, resume, 60);
    assert!(engine.inside_count() > 30);
}

#[test]
fn test_stopped_engine_ignores_orphaned_frames() {
    let sim = Simulation::default();
    let mut engine = seeded_engine(104);

    run_frames(&mut engine, &sim, 0.0, 30);
    engine.stop();
    let frozen: Vec<_> = engine.snapshot().to_vec();

    // The host scheduler fires once more after teardown
    engine.step(1e9, 100.0, NetFlow::Inward, CellState::Turgid);

    assert_eq!(engine.snapshot(), &frozen[..]);
}

#[test]
fn test_reinitialization_is_clean() {
    let sim = Simulation::default();
    let mut first = seeded_engine(105);
    run_frames(&mut first, &sim, 0.0, 120);
    first.stop();

    // Canvas remount: fresh particle set and accumulator, prior instance inert
    let mut second = seeded_engine(105);
    assert_eq!(second.inside_count(), 30);
    assert_eq!(second.step_count(), 0);

    run_frames(&mut second, &sim, 0.0, 120);
    assert_eq!(second.snapshot().len(), 100);
    assert!(!first.is_running());
}

#[test]
fn test_parameters_round_trip_through_config() {
    let params = Parameters::default();
    assert_eq!(params.engine.total_count(), 100);

    let json = serde_json::to_string(&params).unwrap();
    let parsed: Parameters = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.engine.transfer_batch, params.engine.transfer_batch);
}
