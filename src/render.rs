use image::{ImageBuffer, Rgb, RgbImage};
use crate::export::FluidData;

/// Rasterises the interior cells of a fluid into an image of fixed size.
pub struct Renderer {
    width: u32,
    height: u32,
    color: [u8; 3],
    velocity_scale: f32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color: [0, 121, 241],
            velocity_scale: 1.0,
        }
    }

    /// Colour drawn at density 1; lower densities fade linearly to black.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Speed that maps to a fully saturated channel in the velocity image.
    pub fn with_velocity_scale(mut self, velocity_scale: f32) -> Self {
        self.velocity_scale = velocity_scale.max(f32::EPSILON);
        self
    }

    /// Maps an image pixel to the padded index of the interior cell under it.
    fn cell_index(&self, simulation: &impl FluidData, px: u32, py: u32) -> usize {
        let n = simulation.size();
        let cx = (px as usize * n / self.width as usize).min(n - 1) + 1;
        let cy = (py as usize * n / self.height as usize).min(n - 1) + 1;
        cy * simulation.stride() + cx
    }

    pub fn render_density(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);
        let density = simulation.density();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let d = density[self.cell_index(simulation, x, y)].clamp(0.0, 1.0);
            let [r, g, b] = self.color;
            *pixel = Rgb([
                (r as f32 * d) as u8,
                (g as f32 * d) as u8,
                (b as f32 * d) as u8,
            ]);
        }

        img
    }

    pub fn render_velocity(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);
        let vel_x = simulation.velocity_x();
        let vel_y = simulation.velocity_y();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let idx = self.cell_index(simulation, x, y);

            // Map velocity to color (red for x, green for y)
            let r = ((vel_x[idx].abs() / self.velocity_scale * 255.0).min(255.0)) as u8;
            let g = ((vel_y[idx].abs() / self.velocity_scale * 255.0).min(255.0)) as u8;
            *pixel = Rgb([r, g, 128]);
        }

        img
    }
}
