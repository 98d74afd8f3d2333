//! Water molecule particles and their initial placement.

use crate::config::EngineParameters;
use glam::Vec2;
use rand::prelude::*;

/// A single water molecule in the animation
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Unique within the owning engine's lifetime
    pub id: u32,
    /// Position in canvas space (px)
    pub position: Vec2,
    /// Velocity in px per frame, before the temperature speed multiplier
    pub velocity: Vec2,
    /// Whether the particle currently lives in the cytoplasm region.
    /// The only field the engine toggles endogenously (via membrane transfer).
    pub is_inside: bool,
}

impl Particle {
    /// Spawn a particle at a uniformly random position in its home region.
    ///
    /// Outside particles land anywhere in the canvas rectangle inset by the
    /// spawn margin (they may initially overlap the cell; the bounce rules
    /// correct that visually). Inside particles land in a canvas-centered
    /// rectangle of half the nominal cell width/height.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        id: u32,
        is_inside: bool,
        width: f32,
        height: f32,
        params: &EngineParameters,
    ) -> Self {
        let position = if is_inside {
            let x0 = width / 2.0 - params.cell_width_px / 4.0;
            let y0 = height / 2.0 - params.cell_height_px / 4.0;
            Vec2::new(
                x0 + rng.gen::<f32>() * (params.cell_width_px / 2.0),
                y0 + rng.gen::<f32>() * (params.cell_height_px / 2.0),
            )
        } else {
            let margin = params.spawn_margin_px;
            Vec2::new(
                margin + rng.gen::<f32>() * (width - margin * 2.0),
                margin + rng.gen::<f32>() * (height - margin * 2.0),
            )
        };

        // Velocity components uniform in [-1, 1]
        let velocity = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));

        Self {
            id,
            position,
            velocity,
            is_inside,
        }
    }
}
