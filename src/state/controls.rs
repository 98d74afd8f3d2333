//! Control surface for the simulation.
//!
//! Owns the three user-facing parameters (concentration, temperature, stomata)
//! plus the memoized derived state, and applies scenario presets atomically.
//! Enforcement of "manual controls locked while a preset is active" is a UI
//! concern; this layer only records which scenario is active.

use crate::config::BiologyParameters;
use crate::state::{CellState, DerivedState, NetFlow};
use serde::{Deserialize, Serialize};

/// Named environmental scenario presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Baseline lab conditions
    Normal,
    /// Hot, dry soil: high external solute, stomata closed
    Drought,
    /// Flooded with fresh water: very low external solute
    Freshwater,
}

/// Parameter values a scenario applies atomically
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioPreset {
    pub concentration: f32,
    pub temperature: f32,
    pub stomata_open: bool,
}

impl Scenario {
    /// Preset table; selecting a scenario overwrites all three parameters
    pub fn preset(self) -> ScenarioPreset {
        match self {
            Scenario::Normal => ScenarioPreset {
                concentration: 50.0,
                temperature: 50.0,
                stomata_open: true,
            },
            Scenario::Drought => ScenarioPreset {
                concentration: 90.0,
                temperature: 85.0,
                stomata_open: false,
            },
            Scenario::Freshwater => ScenarioPreset {
                concentration: 10.0,
                temperature: 40.0,
                stomata_open: true,
            },
        }
    }
}

/// User-facing simulation parameters and their derived biological state
#[derive(Debug, Clone)]
pub struct Simulation {
    params: BiologyParameters,
    concentration: f32,
    temperature: f32,
    stomata_open: bool,
    scenario: Scenario,
    derived: DerivedState,
}

impl Simulation {
    /// Create a simulation in the Normal scenario's default state
    /// (concentration 50, temperature 50, stomata open => Flaccid)
    pub fn new(params: BiologyParameters) -> Self {
        let preset = Scenario::Normal.preset();
        let derived = DerivedState::derive(preset.concentration, preset.stomata_open, &params);

        Self {
            params,
            concentration: preset.concentration,
            temperature: preset.temperature,
            stomata_open: preset.stomata_open,
            scenario: Scenario::Normal,
            derived,
        }
    }

    /// Set external solute concentration (clamped to 0..=100)
    pub fn set_concentration(&mut self, value: f32) {
        self.concentration = value.clamp(0.0, 100.0);
        self.scenario = Scenario::Normal;
        self.rederive();
    }

    /// Set temperature (clamped to 0..=100). Temperature only affects particle
    /// speed, so the derived state is left untouched.
    pub fn set_temperature(&mut self, value: f32) {
        self.temperature = value.clamp(0.0, 100.0);
        self.scenario = Scenario::Normal;
    }

    /// Open or close the stomata
    pub fn set_stomata_open(&mut self, open: bool) {
        self.stomata_open = open;
        self.scenario = Scenario::Normal;
        self.rederive();
    }

    /// Apply a scenario preset. All three parameters change together; a step
    /// scheduled after this call observes the complete preset, never a
    /// partial one.
    pub fn set_scenario(&mut self, scenario: Scenario) {
        let preset = scenario.preset();
        self.concentration = preset.concentration;
        self.temperature = preset.temperature;
        self.stomata_open = preset.stomata_open;
        self.scenario = scenario;
        self.rederive();
    }

    fn rederive(&mut self) {
        self.derived = DerivedState::derive(self.concentration, self.stomata_open, &self.params);
    }

    pub fn concentration(&self) -> f32 {
        self.concentration
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn stomata_open(&self) -> bool {
        self.stomata_open
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Derived state, recomputed on every concentration/stomata change
    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    pub fn cell_state(&self) -> CellState {
        self.derived.cell_state
    }

    pub fn net_flow(&self) -> NetFlow {
        self.derived.net_flow
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(BiologyParameters::default())
    }
}
