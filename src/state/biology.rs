//! Biological state derivation.
//!
//! Maps the continuous control inputs (external solute concentration, stomata
//! state) onto a discrete cell state and net water flow direction via a
//! simplified water-potential model:
//!
//! ```text
//! diff = internal_potential - (concentration + stomata_effect)
//! diff >  threshold  =>  Turgid,      water entering
//! diff < -threshold  =>  Plasmolyzed, water leaving
//! otherwise          =>  Flaccid,     equilibrium
//! ```
//!
//! Hypotonic surroundings (low solute) drive water in; hypertonic surroundings
//! (high solute) drive water out. Open stomata raise the effective external
//! potential by a fixed offset, modeling transpirational loss.

use crate::config::BiologyParameters;
use serde::{Deserialize, Serialize};

/// Discrete osmotic state of the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Net water inflow; cell swollen and firm
    Turgid,
    /// Equilibrium; no net water movement
    Flaccid,
    /// Net water outflow; membrane pulling away from the wall
    Plasmolyzed,
}

impl CellState {
    /// Scale factor applied to the cell membrane rectangle.
    ///
    /// The membrane shrinks as the cell loses water; the wall footprint
    /// stays fixed.
    pub fn membrane_scale(self) -> f32 {
        match self {
            CellState::Turgid => 1.0,
            CellState::Flaccid => 0.9,
            CellState::Plasmolyzed => 0.75,
        }
    }

    /// Scale factor applied to the central vacuole (shrinks faster than the
    /// membrane; consumed by the renderer only).
    pub fn vacuole_scale(self) -> f32 {
        match self {
            CellState::Turgid => 1.0,
            CellState::Flaccid => 0.85,
            CellState::Plasmolyzed => 0.6,
        }
    }
}

/// Net direction of bulk water movement across the membrane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetFlow {
    /// Water leaving the cell (-1)
    Outward,
    /// No net movement (0)
    Equilibrium,
    /// Water entering the cell (+1)
    Inward,
}

impl NetFlow {
    /// Signed indicator expected by renderers: -1, 0, or +1
    pub fn signum(self) -> i32 {
        match self {
            NetFlow::Outward => -1,
            NetFlow::Equilibrium => 0,
            NetFlow::Inward => 1,
        }
    }
}

/// Explanatory text shown alongside the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub description: &'static str,
}

impl Explanation {
    /// Text pair for a derived cell state; `None` yields the introductory
    /// prompt shown before any state has been computed.
    pub fn for_state(state: Option<CellState>) -> Self {
        match state {
            Some(CellState::Turgid) => Explanation {
                title: "Cell is Turgid (Healthy)",
                description: "Water is entering the cell because the external solution is \
                    hypotonic (low solute concentration). The cell swells and becomes firm, \
                    which is the ideal state for most plant cells.",
            },
            Some(CellState::Flaccid) => Explanation {
                title: "Cell is Flaccid (Isotonic)",
                description: "The external solution is isotonic. Water moves in and out of \
                    the cell at equal rates. The cell is neither swollen nor shrunken, but \
                    lacks the turgor pressure for optimal plant support.",
            },
            Some(CellState::Plasmolyzed) => Explanation {
                title: "Cell is Plasmolyzed (Shrinking)",
                description: "Watch closely! Water is rapidly leaving the cell because the \
                    external solution is hypertonic (high solute concentration). This \
                    process, called plasmolysis, causes the cell membrane to pull away from \
                    the cell wall.",
            },
            None => Explanation {
                title: "Observing Osmosis",
                description: "Adjust the controls to see how the plant cell reacts to its \
                    environment.",
            },
        }
    }
}

/// Jointly consistent outputs of the state derivation.
///
/// Invariant: the pairing is always Turgid/Inward, Flaccid/Equilibrium, or
/// Plasmolyzed/Outward; no other combination is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedState {
    pub cell_state: CellState,
    pub net_flow: NetFlow,
    pub explanation: Explanation,
}

impl DerivedState {
    /// Derive cell state and net flow from the control inputs.
    ///
    /// Pure and total: any real concentration is tolerated (the control
    /// surface clamps to 0..=100 before calling, but out-of-range values just
    /// fall through the same threshold math). Temperature does not participate;
    /// it only scales particle speed in the engine.
    pub fn derive(concentration: f32, stomata_open: bool, params: &BiologyParameters) -> Self {
        let stomata_effect = if stomata_open { params.stomata_effect } else { 0.0 };
        let difference = params.internal_potential - (concentration + stomata_effect);

        // Strict inequalities: a difference exactly at the threshold is Flaccid.
        let (cell_state, net_flow) = if difference > params.flow_threshold {
            (CellState::Turgid, NetFlow::Inward)
        } else if difference < -params.flow_threshold {
            (CellState::Plasmolyzed, NetFlow::Outward)
        } else {
            (CellState::Flaccid, NetFlow::Equilibrium)
        };

        Self {
            cell_state,
            net_flow,
            explanation: Explanation::for_state(Some(cell_state)),
        }
    }
}
