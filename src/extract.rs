use core::ops::Add;

use crate::{
    errors::ErrorField,
    index::TriangleIndex,
    mesh::Mesh,
    utils::{
        grid::{grid_idx, manhattan, midpoint},
        types::{GridIdx, Triangle, TriangleCorners, Vertex, VertexIdx},
    },
};

/// Scratch map from grid vertex to its position in the output vertex list.
///
/// Entries are 1-based, `0` marks a vertex that is not part of the mesh (yet).
/// A map belongs to exactly one extraction at a time and is reset at the start of every call.
#[derive(Debug, Clone)]
pub struct VertexIndexMap {
    indices: Vec<VertexIdx>,
    num_assigned: VertexIdx,
}

impl VertexIndexMap {
    pub fn new(grid_size: usize) -> Self {
        Self {
            indices: vec![0; grid_size * grid_size],
            num_assigned: 0,
        }
    }

    pub fn reset(&mut self) {
        self.indices.fill(0);
        self.num_assigned = 0;
    }

    /// Assigns the next output index to the grid vertex, returns `false` if it already had one.
    fn assign(&mut self, g_idx: GridIdx) -> bool {
        if self.indices[g_idx] != 0 {
            return false;
        }

        self.num_assigned += 1;
        self.indices[g_idx] = self.num_assigned;
        true
    }

    /// The 0-based output index of an assigned grid vertex.
    fn output_idx(&self, g_idx: GridIdx) -> VertexIdx {
        debug_assert_ne!(self.indices[g_idx], 0, "grid vertex {g_idx} was never counted");
        self.indices[g_idx] - 1
    }

    /// The 0-based output index of a grid vertex, if it is part of the last extracted mesh.
    pub fn get(&self, g_idx: GridIdx) -> Option<VertexIdx> {
        self.indices[g_idx].checked_sub(1)
    }

    pub const fn num_assigned(&self) -> usize {
        self.num_assigned as usize
    }
}

/// Vertices and triangles added by a subtree of the descent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    vertices: usize,
    triangles: usize,
}

impl Add for Counts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            vertices: self.vertices + rhs.vertices,
            triangles: self.triangles + rhs.triangles,
        }
    }
}

/// Threshold-driven mesh extraction over a [`TriangleIndex`].
///
/// The extractor owns its [`VertexIndexMap`], so it can be reused for many thresholds and error fields of the same
/// grid size without reallocating. Concurrent extractions each need their own extractor.
///
/// ```
/// use rtin::{ErrorField, MeshExtractor, TriangleIndex};
///
/// let index = TriangleIndex::new(3).unwrap();
/// let terrain = vec![0.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0];
/// let errors = ErrorField::compute(&index, &terrain).unwrap();
///
/// let mut extractor = MeshExtractor::new(&index);
/// assert_eq!(extractor.extract(&errors, 0.0).num_triangles(), 4);
/// assert_eq!(extractor.extract(&errors, 5.0).num_triangles(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MeshExtractor<'a> {
    index: &'a TriangleIndex,
    vertex_map: VertexIndexMap,
}

impl<'a> MeshExtractor<'a> {
    pub fn new(index: &'a TriangleIndex) -> Self {
        Self {
            index,
            vertex_map: VertexIndexMap::new(index.grid_size()),
        }
    }

    /// Extracts the mesh for `max_error`.
    ///
    /// A triangle is split while it is larger than a unit triangle and the error at its hypotenuse midpoint is
    /// strictly above `max_error`. `0.0` refines down to unit triangles wherever the terrain is not planar,
    /// any value at or above [`ErrorField::max_error`] yields the two root triangles.
    ///
    /// The descent runs twice: the first pass numbers the vertices and counts the leaves, the second writes them
    /// into buffers of exactly that size. Both passes take the same decisions, see `Descent::split`.
    pub fn extract(&mut self, errors: &ErrorField, max_error: f64) -> Mesh {
        debug_assert_eq!(errors.grid_size(), self.index.grid_size());

        #[cfg(feature = "timing")]
        let now = std::time::Instant::now();

        self.vertex_map.reset();

        let roots = self.index.roots();
        let mut descent = Descent {
            errors,
            max_error,
            grid_size: self.index.grid_size(),
            vertex_map: &mut self.vertex_map,
        };

        let counts = roots
            .iter()
            .fold(Counts::default(), |acc, &root| acc + descent.count(root));

        let mut vertices: Vec<Vertex> = vec![[0, 0]; counts.vertices];
        let mut triangles: Vec<Triangle> = Vec::with_capacity(counts.triangles);

        for root in roots {
            descent.emit(root, &mut vertices, &mut triangles);
        }
        debug_assert_eq!(triangles.len(), counts.triangles);

        #[cfg(feature = "timing")]
        log::trace!("Mesh extracted in {} μs", now.elapsed().as_micros());
        log::debug!(
            "Extracted mesh with {} vertices and {} triangles for max error {max_error}",
            counts.vertices,
            counts.triangles
        );

        Mesh::new(vertices, triangles)
    }

    /// The vertex map of the last extraction.
    pub const fn vertex_map(&self) -> &VertexIndexMap {
        &self.vertex_map
    }
}

/// State of a single extraction call.
struct Descent<'e, 'm> {
    errors: &'e ErrorField,
    max_error: f64,
    grid_size: usize,
    vertex_map: &'m mut VertexIndexMap,
}

impl Descent<'_, '_> {
    /// The two children of `abc` if it has to be split, `None` if it is a leaf of the mesh.
    ///
    /// The children rotate the corners the same way the index does: `(c, a, m)` and `(b, c, m)`.
    fn split(&self, [a, b, c]: TriangleCorners) -> Option<[TriangleCorners; 2]> {
        let m = midpoint(a, b);

        if manhattan(a, c) > 1 && self.errors.at(m) > self.max_error {
            Some([[c, a, m], [b, c, m]])
        } else {
            None
        }
    }

    fn count(&mut self, triangle: TriangleCorners) -> Counts {
        if let Some([left, right]) = self.split(triangle) {
            return self.count(left) + self.count(right);
        }

        let mut vertices = 0;
        for v in triangle {
            if self.vertex_map.assign(grid_idx(v, self.grid_size)) {
                vertices += 1;
            }
        }

        Counts {
            vertices,
            triangles: 1,
        }
    }

    fn emit(&self, triangle: TriangleCorners, vertices: &mut [Vertex], triangles: &mut Vec<Triangle>) {
        if let Some([left, right]) = self.split(triangle) {
            self.emit(left, vertices, triangles);
            self.emit(right, vertices, triangles);
            return;
        }

        let mut out = [0; 3];
        for (slot, v) in out.iter_mut().zip(triangle) {
            let v_idx = self.vertex_map.output_idx(grid_idx(v, self.grid_size));
            vertices[v_idx as usize] = v;
            *slot = v_idx;
        }

        triangles.push(out);
    }
}
