use crate::{
    errors::{check_terrain_len, ErrorField},
    index::TriangleIndex,
    mesh::Mesh,
    utils::{grid::grid_idx, types::Vertex},
};
use anyhow::Result;

/// A heightfield together with its error field, bound to the [`TriangleIndex`] of its grid size.
///
/// ```
/// use rtin::TriangleIndex;
///
/// let index = TriangleIndex::new(5).unwrap();
/// let mut terrain = vec![0.0; 25];
/// terrain[2 * 5 + 2] = 10.0;
///
/// let tile = index.create_tile(terrain).unwrap();
/// let mesh = tile.mesh(1.0);
///
/// assert!(mesh.is_sound(&index));
/// assert!(mesh.vertices().contains(&[2, 2]));
/// assert_eq!(tile.height([2, 2]), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tile<'a> {
    index: &'a TriangleIndex,
    terrain: Vec<f64>,
    errors: ErrorField,
}

impl<'a> Tile<'a> {
    /// Computes the error field of `terrain`, which must hold `grid_size²` elevations.
    pub fn new(index: &'a TriangleIndex, terrain: Vec<f64>) -> Result<Self> {
        let errors = ErrorField::compute(index, &terrain)?;

        Ok(Self {
            index,
            terrain,
            errors,
        })
    }

    /// Extracts the mesh for `max_error`, see [`crate::MeshExtractor::extract`].
    pub fn mesh(&self, max_error: f64) -> Mesh {
        Mesh::extract(self.index, &self.errors, max_error)
    }

    pub const fn index(&self) -> &TriangleIndex {
        self.index
    }

    pub fn terrain(&self) -> &[f64] {
        &self.terrain
    }

    /// Mutable access to the elevations, call [`Tile::update`] afterwards.
    pub fn terrain_mut(&mut self) -> &mut [f64] {
        &mut self.terrain
    }

    pub const fn errors(&self) -> &ErrorField {
        &self.errors
    }

    /// The elevation of a mesh vertex.
    pub fn height(&self, v: Vertex) -> f64 {
        self.terrain[grid_idx(v, self.index.grid_size())]
    }

    /// Recomputes the error field from the current elevations.
    pub fn update(&mut self) {
        self.errors.recompute(self.index, &self.terrain);
    }

    /// Replaces the heightfield and recomputes the error field.
    ///
    /// On a length mismatch the tile keeps its previous heightfield and errors.
    pub fn set_terrain(&mut self, terrain: Vec<f64>) -> Result<()> {
        check_terrain_len(self.index, &terrain)?;

        self.terrain = terrain;
        self.update();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RtinError;
    use rtin_test_utils::{flat_terrain, ridge_terrain, sample_terrain, spike_terrain};

    #[test]
    fn test_tile_matches_free_functions() {
        let index = TriangleIndex::new(33).unwrap();
        let terrain = sample_terrain(33, None);
        let errors = ErrorField::compute(&index, &terrain).unwrap();

        let tile = index.create_tile(terrain.clone()).unwrap();
        assert_eq!(tile.errors(), &errors);
        assert_eq!(tile.terrain(), terrain.as_slice());
        assert_eq!(tile.index().grid_size(), 33);

        for max_error in [0.0, 0.01, 0.1, 1.0] {
            assert_eq!(tile.mesh(max_error), Mesh::extract(&index, &errors, max_error));
        }
    }

    #[test]
    fn test_create_tile_length_mismatch() {
        let index = TriangleIndex::new(9).unwrap();
        let err = index.create_tile(vec![0.0; 80]).unwrap_err();

        assert_eq!(
            err.downcast_ref::<RtinError>(),
            Some(&RtinError::TerrainLengthMismatch {
                expected: 81,
                actual: 80
            })
        );
    }

    #[test]
    fn test_set_terrain() {
        let index = TriangleIndex::new(9).unwrap();
        let mut tile = index.create_tile(flat_terrain(9, 3.0)).unwrap();
        assert_eq!(tile.mesh(0.0).num_triangles(), 2);

        tile.set_terrain(ridge_terrain(9)).unwrap();
        assert_eq!(tile.mesh(4.0).num_triangles(), 100);

        // a rejected heightfield leaves the tile untouched
        assert!(tile.set_terrain(vec![0.0; 17]).is_err());
        assert_eq!(tile.terrain(), ridge_terrain(9).as_slice());
        assert_eq!(tile.mesh(4.0).num_triangles(), 100);
    }

    #[test]
    fn test_update_after_edit() {
        let index = TriangleIndex::new(17).unwrap();
        let mut tile = index.create_tile(flat_terrain(17, 0.0)).unwrap();

        tile.terrain_mut()[9 * 17 + 4] = 250.0;
        tile.update();

        let fresh = index.create_tile(spike_terrain(17, [4, 9], 250.0)).unwrap();
        assert_eq!(tile.errors(), fresh.errors());
        assert_eq!(tile.mesh(0.0), fresh.mesh(0.0));
    }

    #[test]
    fn test_height() {
        let index = TriangleIndex::new(5).unwrap();
        let tile = index.create_tile(spike_terrain(5, [3, 1], 7.0)).unwrap();

        assert_eq!(tile.height([3, 1]), 7.0);
        assert_eq!(tile.height([1, 3]), 0.0);

        let mesh = tile.mesh(0.0);
        assert!(mesh.vertices().iter().any(|&v| tile.height(v) == 7.0));
    }
}
