//! Padded scalar grids and the current/previous buffer pair.
//!
//! A grid of logical size N stores `(N+2)²` cells. Indices `1..=N` on each axis are
//! interior cells; `0` and `N+1` form the boundary ring, which is only ever derived
//! from interior values by [`crate::boundary::set_boundaries`].

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    stride: usize,
    data: Vec<f32>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let stride = size + 2;
        Self {
            size,
            stride,
            data: vec![0.0; stride * stride],
        }
    }

    /// Number of interior cells along one axis (N).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells along one axis including the boundary ring (N+2).
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.stride && y < self.stride);
        y * self.stride + x
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.stride && y < self.stride,
            "cell ({x}, {y}) outside padded grid of stride {}",
            self.stride
        );
        self.data[y * self.stride + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        assert!(
            x < self.stride && y < self.stride,
            "cell ({x}, {y}) outside padded grid of stride {}",
            self.stride
        );
        self.data[y * self.stride + x] = v;
    }

    pub fn fill(&mut self, v: f32) {
        self.data.fill(v);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Raw native-endian bytes of every cell, row-major, for upload to a renderer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Sum over interior cells only.
    pub fn interior_sum(&self) -> f32 {
        (1..=self.size)
            .map(|y| {
                let row = y * self.stride;
                self.data[row + 1..=row + self.size].iter().sum::<f32>()
            })
            .sum()
    }

    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        (1..=self.size).contains(&x) && (1..=self.size).contains(&y)
    }
}

/// Double-buffered field. `previous` is the read source of a sub-step and `current`
/// its write target; [`Field::swap`] exchanges the roles without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) current: Grid,
    pub(crate) previous: Grid,
}

impl Field {
    pub fn new(size: usize) -> Self {
        Self {
            current: Grid::new(size),
            previous: Grid::new(size),
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    pub fn previous_mut(&mut self) -> &mut Grid {
        &mut self.previous
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Adds the staged `previous` values into `current` and clears the stage.
    pub(crate) fn inject_previous(&mut self) {
        for (cur, staged) in self
            .current
            .as_mut_slice()
            .iter_mut()
            .zip(self.previous.as_mut_slice().iter_mut())
        {
            *cur += *staged;
            *staged = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.current.fill(0.0);
        self.previous.fill(0.0);
    }
}
