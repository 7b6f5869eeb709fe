use rayon::prelude::*;
use serde::Serialize;

use crate::export::FluidData;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FluidMetrics {
    pub total_mass: f32,
    pub max_density: f32,
    pub avg_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    pub avg_velocity: f32,
    /// L2 norm of the projection's divergence term over the interior.
    pub divergence_norm: f32,
    pub vorticity: f32,
    pub frame: usize,
}

#[derive(Default)]
struct RowSums {
    mass: f32,
    max_density: f32,
    kinetic_energy: f32,
    max_velocity: f32,
    velocity: f32,
    divergence_sq: f32,
    vorticity: f32,
}

impl RowSums {
    fn merge(self, other: Self) -> Self {
        Self {
            mass: self.mass + other.mass,
            max_density: self.max_density.max(other.max_density),
            kinetic_energy: self.kinetic_energy + other.kinetic_energy,
            max_velocity: self.max_velocity.max(other.max_velocity),
            velocity: self.velocity + other.velocity,
            divergence_sq: self.divergence_sq + other.divergence_sq,
            vorticity: self.vorticity + other.vorticity,
        }
    }
}

impl FluidMetrics {
    pub fn analyze(simulation: &impl FluidData, frame: usize) -> Self {
        let n = simulation.size();
        let stride = simulation.stride();
        let density = simulation.density();
        let vel_x = simulation.velocity_x();
        let vel_y = simulation.velocity_y();

        // Rows are independent; the solver itself never runs on the pool.
        let sums = (1..=n)
            .into_par_iter()
            .map(|y| {
                let mut row = RowSums::default();
                for x in 1..=n {
                    let idx = y * stride + x;
                    let d = density[idx];
                    let vx = vel_x[idx];
                    let vy = vel_y[idx];

                    row.mass += d;
                    row.max_density = row.max_density.max(d);

                    let speed = (vx * vx + vy * vy).sqrt();
                    row.kinetic_energy += 0.5 * d * speed * speed;
                    row.max_velocity = row.max_velocity.max(speed);
                    row.velocity += speed;

                    let div = -0.5
                        * (vel_x[idx + 1] - vel_x[idx - 1] + vel_y[idx + stride] - vel_y[idx - stride])
                        / n as f32;
                    row.divergence_sq += div * div;

                    let curl = 0.5 * (vel_y[idx + 1] - vel_y[idx - 1] - vel_x[idx + stride] + vel_x[idx - stride]);
                    row.vorticity += curl.abs();
                }
                row
            })
            .reduce(RowSums::default, RowSums::merge);

        let cells = (n * n) as f32;
        Self {
            total_mass: sums.mass,
            max_density: sums.max_density,
            avg_density: sums.mass / cells,
            total_kinetic_energy: sums.kinetic_energy,
            max_velocity: sums.max_velocity,
            avg_velocity: sums.velocity / cells,
            divergence_norm: sums.divergence_sq.sqrt(),
            vorticity: sums.vorticity / cells,
            frame,
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "frame {}: mass {:.6} (max {:.4}, avg {:.6}), kinetic {:.6}, speed max {:.4} avg {:.4}, divergence {:.6}, vorticity {:.6}",
            self.frame,
            self.total_mass,
            self.max_density,
            self.avg_density,
            self.total_kinetic_energy,
            self.max_velocity,
            self.avg_velocity,
            self.divergence_norm,
            self.vorticity
        );
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self {
            metrics_history: Vec::new(),
        }
    }

    pub fn record_frame(&mut self, simulation: &impl FluidData, frame: usize) -> &FluidMetrics {
        let metrics = FluidMetrics::analyze(simulation, frame);
        self.metrics_history.push(metrics);
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    pub fn log_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last()) else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        log::info!(
            "mass change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            (last.total_mass - first.total_mass) / first.total_mass.max(f32::EPSILON) * 100.0
        );
        log::info!(
            "kinetic energy change: {:.6} -> {:.6}",
            first.total_kinetic_energy,
            last.total_kinetic_energy
        );
        log::info!(
            "divergence change: {:.6} -> {:.6}",
            first.divergence_norm,
            last.divergence_norm
        );
    }
}
