use crate::{
    error::RtinError,
    index::TriangleIndex,
    utils::{
        grid::{grid_idx, max_nan, midpoint},
        types::{GridCoord, Vertex},
    },
};
use anyhow::Result;

/// The worst vertical approximation error per grid vertex.
///
/// `errors[v]` holds the largest error made anywhere in the sub-hierarchy whose root hypotenuse midpoint is `v`,
/// if that sub-hierarchy was replaced by a single triangle. The field is immutable once computed and can be shared
/// between any number of mesh extractions.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorField {
    grid_size: usize,
    errors: Vec<f64>,
}

impl ErrorField {
    /// Computes the error field of a row-major heightfield with `grid_size²` elevations.
    ///
    /// Fails with [`RtinError::TerrainLengthMismatch`] if the heightfield has a different length.
    /// Elevations are not sanitized, a `NaN` poisons every ancestor midpoint up to the center of the grid.
    pub fn compute(index: &TriangleIndex, terrain: &[f64]) -> Result<Self> {
        check_terrain_len(index, terrain)?;

        let mut field = Self {
            grid_size: index.grid_size(),
            errors: vec![0.0; terrain.len()],
        };
        field.accumulate(index, terrain);

        Ok(field)
    }

    /// Resets the field and recomputes it for a new heightfield of the same length.
    pub(crate) fn recompute(&mut self, index: &TriangleIndex, terrain: &[f64]) {
        self.errors.fill(0.0);
        self.accumulate(index, terrain);
    }

    /// Walks the hierarchy bottom-up, i.e. by descending id, so every child midpoint is final before its parent reads it.
    fn accumulate(&mut self, index: &TriangleIndex, terrain: &[f64]) {
        #[cfg(feature = "timing")]
        let now = std::time::Instant::now();

        let size = self.grid_size;

        for id in (0..index.num_triangles()).rev() {
            let [a, b, c] = index.triangle(id);
            let m_idx = grid_idx(midpoint(a, b), size);

            let interpolated = (terrain[grid_idx(a, size)] + terrain[grid_idx(b, size)]) / 2.0;
            let local_error = (interpolated - terrain[m_idx]).abs();

            let mut error = max_nan(self.errors[m_idx], local_error);

            if index.is_parent(id) {
                let left_idx = grid_idx(midpoint(a, c), size);
                let right_idx = grid_idx(midpoint(b, c), size);

                error = max_nan(max_nan(error, self.errors[left_idx]), self.errors[right_idx]);
            }

            self.errors[m_idx] = error;
        }

        #[cfg(feature = "timing")]
        log::trace!("Error field computed in {} μs", now.elapsed().as_micros());
        log::debug!(
            "Computed error field for grid size {size}, max error {}",
            self.max_error()
        );
    }

    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// The row-major error values, one per grid vertex.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// The error at grid vertex `(x, y)`.
    pub fn get(&self, x: GridCoord, y: GridCoord) -> f64 {
        self.at([x, y])
    }

    #[inline]
    pub(crate) fn at(&self, v: Vertex) -> f64 {
        self.errors[grid_idx(v, self.grid_size)]
    }

    /// The error of the whole tile, stored at the center shared by both root hypotenuses.
    ///
    /// Any `max_error` at or above this value yields the two root triangles.
    pub fn max_error(&self) -> f64 {
        let center = ((self.grid_size - 1) / 2) as GridCoord;
        self.get(center, center)
    }
}

/// Checks the heightfield length against the grid of `index`.
pub(crate) fn check_terrain_len(index: &TriangleIndex, terrain: &[f64]) -> Result<()> {
    let expected = index.grid_size() * index.grid_size();

    if terrain.len() != expected {
        log::warn!(
            "Rejected terrain of length {}, expected {expected}",
            terrain.len()
        );
        return Err(RtinError::TerrainLengthMismatch {
            expected,
            actual: terrain.len(),
        }
        .into());
    }

    Ok(())
}
