//! Parameter structures for the osmosis simulation.
//!
//! Defaults hold the reference configuration; individual files under
//! `data/parameters/` may override them.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Particle engine parameters
    pub engine: EngineParameters,
    /// Water-potential model parameters
    pub biology: BiologyParameters,
}

impl Parameters {
    /// Load parameters from JSON files, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        let engine = EngineParameters::load_or_default("data/parameters/engine.json");
        let biology = BiologyParameters::load_or_default("data/parameters/biology.json");

        Self { engine, biology }
    }

    /// Load parameters from a specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let engine = EngineParameters::load_or_default(dir.join("engine.json"));
        let biology = BiologyParameters::load_or_default(dir.join("biology.json"));

        Self { engine, biology }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            engine: EngineParameters::default(),
            biology: BiologyParameters::default(),
        }
    }
}

/// Particle engine parameters
///
/// Counts, dimensions, and timing for the water-molecule animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineParameters {
    /// Number of particles placed in the external medium at init
    pub outside_count: usize,

    /// Number of particles placed in the cytoplasm at init
    pub inside_count: usize,

    /// Nominal cell footprint width (px, canvas space)
    pub cell_width_px: f32,

    /// Nominal cell footprint height (px, canvas space)
    pub cell_height_px: f32,

    /// Inset from the canvas edges when placing outside particles (px)
    pub spawn_margin_px: f32,

    /// Speed multiplier at temperature 0
    pub min_speed: f32,

    /// Speed multiplier at temperature 100
    pub max_speed: f32,

    /// Animation time between membrane transfer firings (ms)
    pub transfer_interval_ms: f64,

    /// Maximum particles reassigned per transfer firing
    pub transfer_batch: usize,
}

impl EngineParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded engine parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse engine parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Engine parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Total particle population (constant for the engine's lifetime)
    pub fn total_count(&self) -> usize {
        self.outside_count + self.inside_count
    }
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            // Reference population: 100 molecules, 70 outside / 30 inside
            outside_count: 70,
            inside_count: 30,

            // Cell footprint in canvas space
            cell_width_px: 400.0,
            cell_height_px: 220.0,
            spawn_margin_px: 10.0,

            // Temperature 0..100 maps linearly onto this speed range
            min_speed: 0.5,
            max_speed: 2.0,

            // Osmotic flow pacing
            transfer_interval_ms: 150.0,
            transfer_batch: 2,
        }
    }
}

/// Water-potential model parameters
///
/// Controls the mapping from external concentration and stomata state to
/// cell state and net flow direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiologyParameters {
    /// Water potential of the cell interior (constant, % scale)
    pub internal_potential: f32,

    /// Effective external-potential offset while stomata are open
    /// (models transpirational water loss)
    pub stomata_effect: f32,

    /// Potential difference beyond which net flow is nonzero
    pub flow_threshold: f32,
}

impl BiologyParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded biology parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse biology parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Biology parameters file not found, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for BiologyParameters {
    fn default() -> Self {
        Self {
            internal_potential: 50.0,
            stomata_effect: 5.0,
            flow_threshold: 15.0,
        }
    }
}
