//! Particle engine for the osmosis animation.
//!
//! Owns the water-molecule set and evolves it frame by frame:
//! - Brownian-like drift scaled by temperature
//! - elastic reflection at the canvas edges
//! - membrane confinement (asymmetric for inside vs. outside particles)
//! - membership transfer across the membrane on a fixed time cadence,
//!   modeling gradual osmotic flow rather than instantaneous equilibrium
//!
//! The engine never creates or destroys particles after initialization;
//! transfers only toggle the `is_inside` flag.

pub mod driver;
mod particle;

pub use driver::{CancellationToken, FrameDriver};
pub use particle::Particle;

use crate::config::EngineParameters;
use crate::state::{CellState, NetFlow};
use glam::Vec2;
use rand::prelude::*;

/// Owns and evolves the particle set under a frame-driven loop
pub struct ParticleEngine {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    params: EngineParameters,
    /// Timestamp of the last transfer firing (ms, scheduler time)
    last_transfer_ms: f64,
    step_count: u64,
    running: bool,
}

impl ParticleEngine {
    /// Create an engine for a canvas of the given dimensions, placing
    /// particles with a real entropy source
    pub fn new(width: f32, height: f32, params: EngineParameters) -> Self {
        Self::with_rng(width, height, params, &mut rand::thread_rng())
    }

    /// Create an engine with a caller-supplied random source, so tests can
    /// seed placement deterministically
    pub fn with_rng<R: Rng>(
        width: f32,
        height: f32,
        params: EngineParameters,
        rng: &mut R,
    ) -> Self {
        let mut particles = Vec::with_capacity(params.total_count());
        let mut id = 0u32;

        for _ in 0..params.outside_count {
            particles.push(Particle::spawn(rng, id, false, width, height, &params));
            id += 1;
        }
        for _ in 0..params.inside_count {
            particles.push(Particle::spawn(rng, id, true, width, height, &params));
            id += 1;
        }

        log::info!(
            "particle engine initialized: {} molecules ({} outside / {} inside), canvas {}x{}",
            particles.len(),
            params.outside_count,
            params.inside_count,
            width,
            height
        );

        Self {
            particles,
            width,
            height,
            params,
            last_transfer_ms: 0.0,
            step_count: 0,
            running: true,
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// `timestamp_ms` comes from the frame driver and is monotonically
    /// non-decreasing; the transfer cadence is computed from it, never from
    /// wall-clock polling. A stopped engine, or one whose canvas has no
    /// measurable area yet, skips the frame entirely.
    pub fn step(
        &mut self,
        timestamp_ms: f64,
        temperature: f32,
        net_flow: NetFlow,
        cell_state: CellState,
    ) {
        if !self.running {
            return;
        }
        // Canvas not laid out yet: skip the physics, retry next frame
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        // Linear map from temperature 0..100 onto the speed range
        let warmth = (temperature / 100.0).clamp(0.0, 1.0);
        let speed = self.params.min_speed + warmth * (self.params.max_speed - self.params.min_speed);

        let center = Vec2::new(self.width, self.height) / 2.0;
        let wall_half = Vec2::new(self.params.cell_width_px, self.params.cell_height_px) / 2.0;
        let wall_min = center - wall_half;
        let wall_max = center + wall_half;
        let membrane_half = wall_half * cell_state.membrane_scale();
        let membrane_min = center - membrane_half;
        let membrane_max = center + membrane_half;

        for p in &mut self.particles {
            let tentative = p.position + p.velocity * speed;

            // Canvas edge reflection. Overshoot in one frame is tolerated;
            // the negated velocity brings the particle back next frame.
            if tentative.x <= 0.0 || tentative.x >= self.width {
                p.velocity.x = -p.velocity.x;
            }
            if tentative.y <= 0.0 || tentative.y >= self.height {
                p.velocity.y = -p.velocity.y;
            }

            if p.is_inside {
                // Inside particles are confined by the membrane rectangle,
                // which shrinks with the cell state.
                if tentative.x <= membrane_min.x || tentative.x >= membrane_max.x {
                    p.velocity.x = -p.velocity.x;
                }
                if tentative.y <= membrane_min.y || tentative.y >= membrane_max.y {
                    p.velocity.y = -p.velocity.y;
                }
            } else if tentative.x > wall_min.x
                && tentative.x < wall_max.x
                && tentative.y > wall_min.y
                && tentative.y < wall_max.y
            {
                // Outside particle about to enter the fixed wall footprint:
                // bounce the component whose pre-step position was already at
                // or beyond the wall edge, so an approach from outside
                // reflects instead of tunnelling through. Note the asymmetry
                // with the inside check above (pre-step vs. tentative
                // position); it is intentional and matches the reference
                // visual behavior.
                if p.position.x <= wall_min.x || p.position.x >= wall_max.x {
                    p.velocity.x = -p.velocity.x;
                }
                if p.position.y <= wall_min.y || p.position.y >= wall_max.y {
                    p.velocity.y = -p.velocity.y;
                }
            }

            p.position = tentative;
        }

        // Membrane transfer cadence, independent of frame rate
        if timestamp_ms - self.last_transfer_ms > self.params.transfer_interval_ms {
            self.last_transfer_ms = timestamp_ms;
            self.transfer(net_flow);
        }

        self.step_count += 1;
    }

    /// Reassign up to `transfer_batch` particles whose membership disagrees
    /// with the flow direction. First-found order; a flipped particle is no
    /// longer eligible, so none is double-counted within one firing. Fewer
    /// eligible particles than the batch size is not an error.
    fn transfer(&mut self, net_flow: NetFlow) {
        let target_inside = match net_flow {
            NetFlow::Inward => true,
            NetFlow::Outward => false,
            NetFlow::Equilibrium => return,
        };

        let mut moved = 0;
        for p in &mut self.particles {
            if moved == self.params.transfer_batch {
                break;
            }
            if p.is_inside != target_inside {
                p.is_inside = target_inside;
                moved += 1;
            }
        }
        debug_assert!(moved <= self.params.transfer_batch);

        if moved > 0 {
            log::trace!(
                "transferred {} molecule(s) {}",
                moved,
                if target_inside { "into the cell" } else { "out of the cell" }
            );
        }
    }

    /// Read-only view of the particle set for the renderer
    pub fn snapshot(&self) -> &[Particle] {
        &self.particles
    }

    /// Deregister the engine: after this, `step` mutates nothing, so a stale
    /// scheduler callback firing post-teardown is a no-op
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("particle engine stopped after {} steps", self.step_count);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Number of particles currently inside the cytoplasm
    pub fn inside_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_inside).count()
    }

    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
