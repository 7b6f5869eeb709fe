//! Stable-fluids kernels over padded grids.
//!
//! Diffusion: implicit solve `(I - a Δ) x = x0`, `a = dt·rate·N²`, by Gauss–Seidel.
//! Advection: trace back `p = x - dt·v(x)` and bilinearly sample the source.
//! Projection: solve `Δp = div` by relaxation, then `v -= ½·N·∇p`.
//!
//! Every kernel loops over interior cells `1..=N` only and reads the padding ring,
//! so boundaries must be refreshed before a field is read again.

use crate::boundary::{Boundary, set_boundaries};
use crate::grid::Grid;

/// Gauss–Seidel passes per diffusion or pressure solve. There is no convergence
/// check; cost per step is fixed.
pub const RELAXATION_ITERATIONS: usize = 20;

pub fn diffuse(dt: f32, target: &mut Grid, source: &Grid, rate: f32, kind: Boundary) {
    let n = target.size();
    debug_assert_eq!(n, source.size());
    let a = dt * rate * (n * n) as f32;
    let c = 1.0 + 4.0 * a;
    let stride = target.stride();

    for _ in 0..RELAXATION_ITERATIONS {
        let x0 = source.as_slice();
        let x = target.as_mut_slice();
        for j in 1..=n {
            for i in 1..=n {
                let idx = source.idx(i, j);
                x[idx] = (x0[idx] + a * (x[idx + 1] + x[idx - 1] + x[idx + stride] + x[idx - stride])) / c;
            }
        }
        set_boundaries(target, kind);
    }
}

#[inline]
pub fn sample_bilinear(grid: &Grid, px: f32, py: f32) -> f32 {
    let x0 = px.floor() as usize;
    let y0 = py.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let dx = px - x0 as f32;
    let dy = py - y0 as f32;

    let v00 = grid.get(x0, y0);
    let v01 = grid.get(x0, y1);
    let v10 = grid.get(x1, y0);
    let v11 = grid.get(x1, y1);

    v00 * (1.0 - dx) * (1.0 - dy) + v01 * (1.0 - dx) * dy + v10 * dx * (1.0 - dy) + v11 * dx * dy
}

pub fn advect(
    dt: f32,
    target: &mut Grid,
    source: &Grid,
    vel_x: &Grid,
    vel_y: &Grid,
    kind: Boundary,
) {
    let n = target.size();
    // Keeps all four sample corners inside the padded grid.
    let lo = 0.5;
    let hi = n as f32 + 0.5;

    for y in 1..=n {
        for x in 1..=n {
            let px = (x as f32 - dt * vel_x.get(x, y)).clamp(lo, hi);
            let py = (y as f32 - dt * vel_y.get(x, y)).clamp(lo, hi);
            target.set(x, y, sample_bilinear(source, px, py));
        }
    }
    set_boundaries(target, kind);
}

/// Central-difference divergence term used as the Poisson right-hand side.
#[inline]
pub fn divergence_at(vel_x: &Grid, vel_y: &Grid, x: usize, y: usize) -> f32 {
    let n = vel_x.size() as f32;
    -0.5 * (vel_x.get(x + 1, y) - vel_x.get(x - 1, y) + vel_y.get(x, y + 1) - vel_y.get(x, y - 1)) / n
}

/// Removes the divergent part of `(vel_x, vel_y)`. `pressure` and `divergence` are
/// scratch grids; their previous contents are discarded.
pub fn project(vel_x: &mut Grid, vel_y: &mut Grid, pressure: &mut Grid, divergence: &mut Grid) {
    let n = vel_x.size();

    for y in 1..=n {
        for x in 1..=n {
            divergence.set(x, y, divergence_at(vel_x, vel_y, x, y));
            pressure.set(x, y, 0.0);
        }
    }
    set_boundaries(divergence, Boundary::Copy);
    set_boundaries(pressure, Boundary::Copy);

    let stride = pressure.stride();
    for _ in 0..RELAXATION_ITERATIONS {
        let div = divergence.as_slice();
        let p = pressure.as_mut_slice();
        for j in 1..=n {
            for i in 1..=n {
                let idx = divergence.idx(i, j);
                p[idx] = (div[idx] + p[idx - 1] + p[idx + 1] + p[idx - stride] + p[idx + stride]) / 4.0;
            }
        }
        set_boundaries(pressure, Boundary::Copy);
    }

    let half_n = 0.5 * n as f32;
    for y in 1..=n {
        for x in 1..=n {
            let gx = pressure.get(x + 1, y) - pressure.get(x - 1, y);
            let gy = pressure.get(x, y + 1) - pressure.get(x, y - 1);
            vel_x.set(x, y, vel_x.get(x, y) - half_n * gx);
            vel_y.set(x, y, vel_y.get(x, y) - half_n * gy);
        }
    }
    set_boundaries(vel_x, Boundary::VELOCITY_X);
    set_boundaries(vel_y, Boundary::VELOCITY_Y);
}

/// Dye dissipation: lowers every cell by `amount`, flooring at zero.
pub fn fade(grid: &mut Grid, amount: f32) {
    for v in grid.as_mut_slice() {
        *v = (*v - amount).max(0.0);
    }
}

/// L2 norm of [`divergence_at`] over the interior.
pub fn divergence_norm(vel_x: &Grid, vel_y: &Grid) -> f32 {
    let n = vel_x.size();
    let mut sum = 0.0;
    for y in 1..=n {
        for x in 1..=n {
            let d = divergence_at(vel_x, vel_y, x, y);
            sum += d * d;
        }
    }
    sum.sqrt()
}
