use crate::{
    error::RtinError,
    tile::Tile,
    utils::{
        grid::{is_valid_grid_size, midpoint, third_corner, MAX_GRID_SIZE},
        types::{GridCoord, TriangleCoords, TriangleCorners, TriangleId, Vertex},
    },
};
use anyhow::Result;

/// The implicit right-triangle hierarchy of a square grid of size `2^n+1`.
///
/// Every triangle is an isosceles right triangle. Only the hypotenuse ends `a` and `b` are stored,
/// the right-angle corner `c` is recovered on demand, see [`third_corner`].
///
/// The table only depends on the grid size, so build it once and share it (read-only) between all tiles
/// and threads of that size.
///
/// ```
/// use rtin::TriangleIndex;
///
/// let index = TriangleIndex::new(5).unwrap();
///
/// assert_eq!(index.num_triangles(), 30);
/// assert_eq!(index.num_parent_triangles(), 14);
/// assert!(TriangleIndex::new(4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TriangleIndex {
    grid_size: usize,
    num_triangles: usize,
    /// Triangles with ids below this still have two children.
    num_parent_triangles: usize,
    coords: Vec<TriangleCoords>,
}

impl TriangleIndex {
    /// Builds the coordinate table for a grid of `grid_size` x `grid_size` vertices.
    ///
    /// Fails with [`RtinError::InvalidGridSize`] unless `grid_size - 1` is a power of two (and at least 2).
    pub fn new(grid_size: usize) -> Result<Self> {
        if !is_valid_grid_size(grid_size) || grid_size > MAX_GRID_SIZE {
            log::warn!("Rejected grid size {grid_size}, expected 2^n+1 up to {MAX_GRID_SIZE}");
            return Err(RtinError::InvalidGridSize { grid_size }.into());
        }

        #[cfg(feature = "timing")]
        let now = std::time::Instant::now();

        let tile_size = grid_size - 1;
        let num_triangles = tile_size * tile_size * 2 - 2;
        let num_parent_triangles = num_triangles - tile_size * tile_size;

        let coords = (0..num_triangles)
            .map(|id| Self::walk_to(id, tile_size as GridCoord))
            .collect();

        #[cfg(feature = "timing")]
        log::trace!(
            "Triangle index computed in {} μs",
            now.elapsed().as_micros()
        );
        log::debug!(
            "Built triangle index for grid size {grid_size}: {num_triangles} triangles, {num_parent_triangles} parents"
        );

        Ok(Self {
            grid_size,
            num_triangles,
            num_parent_triangles,
            coords,
        })
    }

    /// Walks down from the roots to the triangle `id` and returns its hypotenuse ends.
    ///
    /// The id is offset by 2, so that the bits of `id + 2` spell the path through a complete binary tree:
    /// - the lowest bit picks the root: odd is `(0,0)-(T,T)` with `c = (T,0)`, even is `(T,T)-(0,0)` with `c = (0,T)`
    /// - then, lowest remaining bit first, every further bit bisects the hypotenuse:
    ///   `1` keeps the left half (`b <- a`, `a <- c`), `0` keeps the right half (`a <- b`, `b <- c`),
    ///   and the old hypotenuse midpoint becomes the new `c`
    /// - the highest set bit only terminates the path
    ///
    /// Children therefore always have a larger id than their parent.
    fn walk_to(id: TriangleId, tile_size: GridCoord) -> TriangleCoords {
        let t = tile_size;
        let mut path = id + 2;

        let (mut a, mut b, mut c): (Vertex, Vertex, Vertex) = if path & 1 == 1 {
            ([0, 0], [t, t], [t, 0])
        } else {
            ([t, t], [0, 0], [0, t])
        };
        path >>= 1;

        while path > 1 {
            let m = midpoint(a, b);

            if path & 1 == 1 {
                // left half
                b = a;
                a = c;
            } else {
                // right half
                a = b;
                b = c;
            }
            c = m;
            path >>= 1;
        }

        [a[0], a[1], b[0], b[1]]
    }

    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub const fn tile_size(&self) -> usize {
        self.grid_size - 1
    }

    /// The number of triangles in the hierarchy, excluding the unit triangles at the bottom.
    pub const fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    /// The number of triangles that still have two children.
    pub const fn num_parent_triangles(&self) -> usize {
        self.num_parent_triangles
    }

    /// Check if the triangle `id` still has children.
    pub const fn is_parent(&self, id: TriangleId) -> bool {
        id < self.num_parent_triangles
    }

    /// The stored `(ax, ay, bx, by)` of every triangle, ordered by id.
    pub fn coords(&self) -> &[TriangleCoords] {
        &self.coords
    }

    /// All three corners `a`, `b`, `c` of the triangle `id`.
    pub fn triangle(&self, id: TriangleId) -> TriangleCorners {
        let [ax, ay, bx, by] = self.coords[id];
        let (a, b) = ([ax, ay], [bx, by]);

        [a, b, third_corner(a, b)]
    }

    /// The two root triangles, in the order the mesh descent visits them.
    pub(crate) fn roots(&self) -> [TriangleCorners; 2] {
        let t = self.tile_size() as GridCoord;

        [[[0, 0], [t, t], [t, 0]], [[t, t], [0, 0], [0, t]]]
    }

    /// Creates a [`Tile`] from a row-major heightfield of `grid_size²` elevations.
    pub fn create_tile(&self, terrain: Vec<f64>) -> Result<Tile<'_>> {
        Tile::new(self, terrain)
    }
}
