use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FluidError;
use crate::params::SimulationParams;

/// Settings for a headless run, loaded from JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub size: usize,
    pub frames: usize,
    pub dt: f32,
    pub output_dir: PathBuf,
    /// Write PNGs every this many frames; 0 disables image output.
    pub export_every: usize,
    pub image_size: u32,
    pub brush_radius: usize,
    pub force: f32,
    /// Frames during which the source keeps injecting density and force.
    pub inject_frames: usize,
    pub seed: u64,
    /// Magnitude of the random initial velocity; 0 starts at rest.
    pub initial_turbulence: f32,
    pub params: SimulationParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: 64,
            frames: 120,
            dt: 0.1,
            output_dir: PathBuf::from("output"),
            export_every: 10,
            image_size: 512,
            brush_radius: 2,
            force: 10.0,
            inject_frames: 30,
            seed: 7,
            initial_turbulence: 0.0,
            params: SimulationParams::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, FluidError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, FluidError> {
        let config: RunConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FluidError> {
        if self.size == 0 {
            return Err(FluidError::InvalidSize(self.size));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(FluidError::InvalidParameter { name: "dt", value: self.dt });
        }
        if !self.force.is_finite() {
            return Err(FluidError::InvalidParameter { name: "force", value: self.force });
        }
        if !self.initial_turbulence.is_finite() {
            return Err(FluidError::InvalidParameter {
                name: "initial_turbulence",
                value: self.initial_turbulence,
            });
        }
        self.params.validate()
    }
}
