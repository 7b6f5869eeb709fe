use std::fs;
use std::path::Path;

use crate::analysis::AnalysisRecorder;
use crate::error::FluidError;
use crate::render::Renderer;
use crate::{FluidSimulation, MacFluid};

/// Read-only view of the padded fields, `(size+2)²` cells each, row-major.
pub trait FluidData {
    fn size(&self) -> usize;
    fn density(&self) -> &[f32];
    fn velocity_x(&self) -> &[f32];
    fn velocity_y(&self) -> &[f32];

    fn stride(&self) -> usize {
        self.size() + 2
    }
}

impl FluidData for MacFluid {
    fn size(&self) -> usize { MacFluid::size(self) }
    fn density(&self) -> &[f32] { MacFluid::density(self).as_slice() }
    fn velocity_x(&self) -> &[f32] { MacFluid::velocity_x(self).as_slice() }
    fn velocity_y(&self) -> &[f32] { MacFluid::velocity_y(self).as_slice() }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        Self { renderer }
    }

    pub fn export_density_png(&self, simulation: &impl FluidData, path: &Path) -> Result<(), FluidError> {
        let img = self.renderer.render_density(simulation);
        img.save(path)?;
        Ok(())
    }

    pub fn export_velocity_png(&self, simulation: &impl FluidData, path: &Path) -> Result<(), FluidError> {
        let img = self.renderer.render_velocity(simulation);
        img.save(path)?;
        Ok(())
    }

    /// Steps `simulation` and writes one density PNG per step into `output_dir`.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut (impl FluidData + FluidSimulation),
        steps: usize,
        dt: f32,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), FluidError> {
        fs::create_dir_all(output_dir)?;
        for i in 0..steps {
            simulation.simulate(dt);

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);

            self.export_density_png(simulation, &path)?;
        }
        log::info!("exported {steps} frames to {}", output_dir.display());
        Ok(())
    }

    pub fn export_metrics_json(&self, recorder: &AnalysisRecorder, path: &Path) -> Result<(), FluidError> {
        let json = serde_json::to_string_pretty(recorder)?;
        fs::write(path, json)?;
        Ok(())
    }
}
