use glam::Vec2;
use rand::Rng;

use crate::FluidSimulation;
use crate::boundary::{Boundary, set_boundaries};
use crate::error::FluidError;
use crate::grid::{Field, Grid};
use crate::params::{ImpulseMode, SimulationParams};
use crate::solver;

/// Stable-fluids simulation on an N×N grid with a one-cell boundary ring.
///
/// Impulses are staged in each field's `previous` buffer and folded into `current` at
/// the start of the next [`MacFluid::simulate`] call. Between calls `current` holds the
/// settled state that renderers read.
#[derive(Debug, Clone, PartialEq)]
pub struct MacFluid {
    size: usize,
    density: Field,
    velocity_x: Field,
    velocity_y: Field,
    params: SimulationParams,
}

impl MacFluid {
    pub fn new(size: usize) -> Result<Self, FluidError> {
        Self::with_params(size, SimulationParams::default())
    }

    pub fn with_params(size: usize, params: SimulationParams) -> Result<Self, FluidError> {
        if size == 0 {
            return Err(FluidError::InvalidSize(size));
        }
        params.validate()?;
        log::debug!("allocating {size}x{size} fluid ({} cells per buffer)", (size + 2) * (size + 2));
        Ok(Self {
            size,
            density: Field::new(size),
            velocity_x: Field::new(size),
            velocity_y: Field::new(size),
            params,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), FluidError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn density(&self) -> &Grid {
        self.density.current()
    }

    pub fn velocity_x(&self) -> &Grid {
        self.velocity_x.current()
    }

    pub fn velocity_y(&self) -> &Grid {
        self.velocity_y.current()
    }

    /// Zeroes every buffer in place; parameters are kept.
    pub fn reset(&mut self) {
        self.density.clear();
        self.velocity_x.clear();
        self.velocity_y.clear();
        log::debug!("fluid reset");
    }

    fn check_cell(&self, x: usize, y: usize, values: &[f32]) -> Result<(), FluidError> {
        if !self.density.current().is_interior(x, y) {
            return Err(FluidError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FluidError::NonFinite { x, y });
        }
        Ok(())
    }

    /// Stages `value` of density at an interior cell. The staged amount is clamped so
    /// the cell lands in `[0, 1]` once injected; negative values erase down to 0.
    pub fn add_density(&mut self, x: usize, y: usize, value: f32) -> Result<(), FluidError> {
        self.check_cell(x, y, &[value])?;
        let current = self.density.current().get(x, y);
        let staged = self.density.previous().get(x, y) + value;
        let room = (1.0 - current).max(0.0);
        let erasable = -current.max(0.0);
        self.density.previous_mut().set(x, y, staged.clamp(erasable, room));
        Ok(())
    }

    /// Interior cells within `reach` of the centre on each axis.
    fn interior_span(&self, center: usize, reach: usize) -> std::ops::RangeInclusive<usize> {
        center.saturating_sub(reach).max(1)..=center.saturating_add(reach).min(self.size)
    }

    /// Stages a velocity impulse, combined according to `params().velocity_impulse`.
    pub fn add_velocity(&mut self, x: usize, y: usize, x_value: f32, y_value: f32) -> Result<(), FluidError> {
        self.check_cell(x, y, &[x_value, y_value])?;
        match self.params.velocity_impulse {
            ImpulseMode::Add => {
                let sx = self.velocity_x.previous().get(x, y) + x_value;
                let sy = self.velocity_y.previous().get(x, y) + y_value;
                self.velocity_x.previous_mut().set(x, y, sx);
                self.velocity_y.previous_mut().set(x, y, sy);
            }
            ImpulseMode::Overwrite => {
                let sx = x_value - self.velocity_x.current().get(x, y);
                let sy = y_value - self.velocity_y.current().get(x, y);
                self.velocity_x.previous_mut().set(x, y, sx);
                self.velocity_y.previous_mut().set(x, y, sy);
            }
        }
        Ok(())
    }

    /// Paints `amount` of density on every interior cell within `radius + 0.5` of the
    /// centre. Returns the number of cells touched.
    pub fn add_density_brush(&mut self, cx: usize, cy: usize, radius: usize, amount: f32) -> Result<usize, FluidError> {
        self.check_cell(cx, cy, &[amount])?;
        let reach = radius as f32 + 0.5;
        let mut painted = 0;
        for y in self.interior_span(cy, radius) {
            for x in self.interior_span(cx, radius) {
                let dx = x as f32 - cx as f32;
                let dy = y as f32 - cy as f32;
                if dx * dx + dy * dy <= reach * reach {
                    self.add_density(x, y, amount)?;
                    painted += 1;
                }
            }
        }
        Ok(painted)
    }

    /// Applies `force` around an interior cell with falloff `1 - d²/r²`. The footprint
    /// is cut off at the grid edge.
    pub fn add_force(&mut self, cx: usize, cy: usize, force: Vec2, radius: f32) -> Result<(), FluidError> {
        self.check_cell(cx, cy, &[force.x, force.y, radius])?;
        if radius <= 0.0 {
            return self.add_velocity(cx, cy, force.x, force.y);
        }

        let r_sq = radius * radius;
        // Saturating cast; the span is clamped to the grid anyway.
        let reach = radius as usize;
        for y in self.interior_span(cy, reach) {
            for x in self.interior_span(cx, reach) {
                let dx = x as f32 - cx as f32;
                let dy = y as f32 - cy as f32;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq <= r_sq {
                    let falloff = 1.0 - dist_sq / r_sq;
                    self.add_velocity(x, y, force.x * falloff, force.y * falloff)?;
                }
            }
        }
        Ok(())
    }

    /// Replaces the current velocity with uniform noise in `[-magnitude/2, magnitude/2]`.
    /// A zero magnitude leaves the fluid untouched.
    pub fn randomize_velocity<R: Rng>(&mut self, rng: &mut R, magnitude: f32) -> Result<(), FluidError> {
        if !magnitude.is_finite() {
            return Err(FluidError::InvalidParameter {
                name: "magnitude",
                value: magnitude,
            });
        }
        let half = 0.5 * magnitude.abs();
        if half == 0.0 {
            return Ok(());
        }
        for y in 1..=self.size {
            for x in 1..=self.size {
                self.velocity_x.current.set(x, y, rng.gen_range(-half..=half));
                self.velocity_y.current.set(x, y, rng.gen_range(-half..=half));
            }
        }
        set_boundaries(&mut self.velocity_x.current, Boundary::VELOCITY_X);
        set_boundaries(&mut self.velocity_y.current, Boundary::VELOCITY_Y);
        Ok(())
    }

    /// Advances one time step: staged impulses, velocity phase, density phase.
    pub fn simulate(&mut self, dt: f32) {
        self.density.inject_previous();
        self.velocity_x.inject_previous();
        self.velocity_y.inject_previous();

        self.simulate_velocity(dt);
        self.simulate_density(dt);
    }

    fn simulate_velocity(&mut self, dt: f32) {
        let viscosity = self.params.viscosity;

        self.velocity_x.swap();
        let Field { current, previous } = &mut self.velocity_x;
        solver::diffuse(dt, current, previous, viscosity, Boundary::VELOCITY_X);

        self.velocity_y.swap();
        let Field { current, previous } = &mut self.velocity_y;
        solver::diffuse(dt, current, previous, viscosity, Boundary::VELOCITY_Y);

        self.project();

        self.velocity_x.swap();
        self.velocity_y.swap();

        let Field { current: vx, previous: vx0 } = &mut self.velocity_x;
        let Field { current: vy, previous: vy0 } = &mut self.velocity_y;
        // Both components trace back through the same settled velocity.
        let (vx0, vy0) = (&*vx0, &*vy0);
        solver::advect(dt, vx, vx0, vx0, vy0, Boundary::VELOCITY_X);
        solver::advect(dt, vy, vy0, vx0, vy0, Boundary::VELOCITY_Y);

        self.project();

        // Scratch from projection; the stage must start empty for the next impulses.
        self.velocity_x.previous.fill(0.0);
        self.velocity_y.previous.fill(0.0);
    }

    fn simulate_density(&mut self, dt: f32) {
        let fade = self.params.fade_rate * dt;
        if fade > 0.0 {
            solver::fade(&mut self.density.current, fade);
        }

        self.density.swap();
        let Field { current, previous } = &mut self.density;
        solver::diffuse(dt, current, previous, self.params.diffusion_rate, Boundary::DENSITY);

        self.density.swap();
        let Field { current, previous } = &mut self.density;
        solver::advect(
            dt,
            current,
            previous,
            self.velocity_x.current(),
            self.velocity_y.current(),
            Boundary::DENSITY,
        );

        self.density.previous.fill(0.0);
    }

    /// Projects the current velocity, using the `previous` buffers as pressure and
    /// divergence scratch.
    fn project(&mut self) {
        let Field { current: vx, previous: pressure } = &mut self.velocity_x;
        let Field { current: vy, previous: divergence } = &mut self.velocity_y;
        solver::project(vx, vy, pressure, divergence);
    }
}

impl FluidSimulation for MacFluid {
    fn simulate(&mut self, dt: f32) {
        self.simulate(dt)
    }

    fn add_force(&mut self, x: usize, y: usize, force: Vec2) -> Result<(), FluidError> {
        self.add_velocity(x, y, force.x, force.y)
    }

    fn add_dye(&mut self, x: usize, y: usize, amount: f32) -> Result<(), FluidError> {
        self.add_density(x, y, amount)
    }

    fn size(&self) -> usize {
        self.size
    }
}
