//! Stable-fluids grid solver for stablefluid

pub mod analysis;
pub mod boundary;
pub mod config;
pub mod error;
pub mod export;
pub mod fluid;
pub mod grid;
pub mod params;
pub mod render;
pub mod solver;

// Unified fluid simulation trait
pub trait FluidSimulation {
    fn simulate(&mut self, dt: f32);
    fn add_force(&mut self, x: usize, y: usize, force: glam::Vec2) -> Result<(), FluidError>;
    fn add_dye(&mut self, x: usize, y: usize, amount: f32) -> Result<(), FluidError>;
    fn size(&self) -> usize;
}

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use boundary::{Axis, Boundary, set_boundaries};
pub use config::RunConfig;
pub use error::FluidError;
pub use export::{FluidData, ImageExporter};
pub use fluid::MacFluid;
pub use grid::{Field, Grid};
pub use params::{ImpulseMode, SimulationParams};
pub use render::Renderer;
pub use solver::RELAXATION_ITERATIONS;
