use serde::{Deserialize, Serialize};

use crate::error::FluidError;

/// How `add_velocity` combines an impulse with the existing cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseMode {
    #[default]
    Add,
    /// The cell ends the injection exactly at the given value.
    Overwrite,
}

/// Per-step tunables, read at the start of every `simulate` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub diffusion_rate: f32,
    pub viscosity: f32,
    /// Density removed per unit of simulated time.
    pub fade_rate: f32,
    pub velocity_impulse: ImpulseMode,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            diffusion_rate: 0.0000125,
            viscosity: 0.0001,
            fade_rate: 0.0,
            velocity_impulse: ImpulseMode::Add,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), FluidError> {
        for (name, value) in [
            ("diffusion_rate", self.diffusion_rate),
            ("viscosity", self.viscosity),
            ("fade_rate", self.fade_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FluidError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
