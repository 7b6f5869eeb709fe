use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// How the padding ring is derived from the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Zero-gradient: padding equals the adjacent interior cell on every edge.
    Copy,
    /// No-penetration for the velocity component along `Axis`: padding is negated on
    /// the walls that component crosses, copied on the other two.
    Reflect(Axis),
}

impl Boundary {
    pub const DENSITY: Boundary = Boundary::Copy;
    pub const VELOCITY_X: Boundary = Boundary::Reflect(Axis::X);
    pub const VELOCITY_Y: Boundary = Boundary::Reflect(Axis::Y);

    #[inline]
    fn sign(self, wall: Axis) -> f32 {
        match self {
            Boundary::Reflect(axis) if axis == wall => -1.0,
            _ => 1.0,
        }
    }
}

pub fn set_boundaries(grid: &mut Grid, kind: Boundary) {
    let n = grid.size();
    let sx = kind.sign(Axis::X);
    let sy = kind.sign(Axis::Y);

    for i in 1..=n {
        // Vertical walls: x = 0 and x = N+1.
        let left = grid.get(1, i);
        let right = grid.get(n, i);
        grid.set(0, i, sx * left);
        grid.set(n + 1, i, sx * right);

        // Horizontal walls: y = 0 and y = N+1.
        let top = grid.get(i, 1);
        let bottom = grid.get(i, n);
        grid.set(i, 0, sy * top);
        grid.set(i, n + 1, sy * bottom);
    }

    // Corners average their two padding neighbours whatever the kind.
    let c = 0.5 * (grid.get(1, 0) + grid.get(0, 1));
    grid.set(0, 0, c);
    let c = 0.5 * (grid.get(1, n + 1) + grid.get(0, n));
    grid.set(0, n + 1, c);
    let c = 0.5 * (grid.get(n, 0) + grid.get(n + 1, 1));
    grid.set(n + 1, 0, c);
    let c = 0.5 * (grid.get(n, n + 1) + grid.get(n + 1, n));
    grid.set(n + 1, n + 1, c);
}
