//! State management for the osmosis simulation.
//!
//! Contains the biological state derivation (cell state, net flow,
//! explanation text) and the control surface that owns the user-facing
//! parameters.

mod biology;
mod controls;

pub use biology::{CellState, DerivedState, Explanation, NetFlow};
pub use controls::{Scenario, ScenarioPreset, Simulation};
