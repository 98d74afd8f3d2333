//! Osmosis Lab - simulation core for an interactive plant-cell osmosis
//! visualization.
//!
//! Two cooperating components: the state derivation (external concentration
//! and stomata state map onto a discrete cell state and net water flow) and
//! the particle engine (a continuous water-molecule animation with boundary
//! collisions and cross-membrane transfer), driven by a monotonic frame
//! clock. Rendering and input widgets live outside this crate and sample the
//! core's outputs each frame.

pub mod config;
pub mod engine;
pub mod state;

pub use config::{BiologyParameters, EngineParameters, Parameters};
pub use engine::{CancellationToken, FrameDriver, Particle, ParticleEngine};
pub use state::{CellState, DerivedState, Explanation, NetFlow, Scenario, Simulation};
