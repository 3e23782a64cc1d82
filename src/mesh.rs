use std::collections::HashSet;

use crate::{
    errors::ErrorField,
    extract::MeshExtractor,
    index::TriangleIndex,
    utils::types::{GridCoord, Triangle, Vertex},
};
use log::error;
use rayon::prelude::*;

/// A mesh extracted from an [`ErrorField`], in grid coordinates.
///
/// Vertices are `(x, y)` pairs in `0..=tile_size`, triangles index into the vertex list.
/// The elevation of a vertex is `terrain[y * grid_size + x]` of the heightfield the errors were computed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub(crate) const fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Extracts a mesh with a scratch map of its own, see [`MeshExtractor::extract`].
    pub fn extract(index: &TriangleIndex, errors: &ErrorField, max_error: f64) -> Self {
        MeshExtractor::new(index).extract(errors, max_error)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The vertices as `[x0, y0, x1, y1, ...]`, ready for a vertex buffer.
    pub fn flat_vertices(&self) -> Vec<GridCoord> {
        self.vertices.iter().flatten().copied().collect()
    }

    /// The triangles as `[i0, j0, k0, i1, j1, k1, ...]`, ready for an index buffer.
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Triangle>) {
        (self.vertices, self.triangles)
    }

    /// Twice the area covered by the triangles, summed in parallel using `rayon`s `par_iter()`.
    pub fn area2(&self) -> u64 {
        self.triangles
            .par_iter()
            .map(|&tri| cross(self.corners(tri)).unsigned_abs())
            .sum()
    }

    fn corners(&self, [i, j, k]: Triangle) -> [Vertex; 3] {
        [
            self.vertices[i as usize],
            self.vertices[j as usize],
            self.vertices[k as usize],
        ]
    }

    /// Checks that the mesh is a valid RTIN tiling of the grid of `index`.
    ///
    /// - every triangle references existing vertices and every vertex is used
    /// - vertices are unique and lie on the grid
    /// - every triangle is right-angled and isosceles, with the right angle at its third corner
    /// - all triangles have the same, non-degenerate orientation
    /// - the triangles cover the square exactly
    pub fn is_sound(&self, index: &TriangleIndex) -> bool {
        let t = index.tile_size() as GridCoord;
        let num_vertices = self.vertices.len();

        if self
            .triangles
            .iter()
            .flatten()
            .any(|&v_idx| v_idx as usize >= num_vertices)
        {
            error!("Mesh references a vertex out of range!");
            return false;
        }

        let used: HashSet<u32> = self.triangles.iter().flatten().copied().collect();
        if used.len() != num_vertices {
            error!(
                "Mesh has {} unused vertices!",
                num_vertices - used.len()
            );
            return false;
        }

        let unique: HashSet<Vertex> = self.vertices.iter().copied().collect();
        if unique.len() != num_vertices {
            error!("Mesh has duplicate vertices!");
            return false;
        }

        if let Some(v) = self.vertices.iter().find(|v| v[0] > t || v[1] > t) {
            error!("Vertex {v:?} is off the grid!");
            return false;
        }

        if let Some(tri) = self
            .triangles
            .iter()
            .find(|&&tri| !is_right_isosceles(self.corners(tri)))
        {
            error!("Triangle {tri:?} is not a right isosceles triangle!");
            return false;
        }

        let Some(&first) = self.triangles.first() else {
            error!("Mesh has no triangles!");
            return false;
        };
        let expected = orientation(self.corners(first));
        if expected == 0
            || self
                .triangles
                .par_iter()
                .any(|&tri| orientation(self.corners(tri)) != expected)
        {
            error!("Triangles are not consistently oriented!");
            return false;
        }

        let area2 = self.area2();
        let expected_area2 = 2 * u64::from(t) * u64::from(t);
        if area2 != expected_area2 {
            error!("Triangles cover {area2}/2 instead of {expected_area2}/2 grid cells!");
            return false;
        }

        true
    }
}

/// `(b - a) x (c - a)`, twice the signed area.
fn cross([a, b, c]: [Vertex; 3]) -> i64 {
    let ab = [i64::from(b[0]) - i64::from(a[0]), i64::from(b[1]) - i64::from(a[1])];
    let ac = [i64::from(c[0]) - i64::from(a[0]), i64::from(c[1]) - i64::from(a[1])];

    ab[0] * ac[1] - ab[1] * ac[0]
}

fn is_right_isosceles([a, b, c]: [Vertex; 3]) -> bool {
    let ca = [i64::from(a[0]) - i64::from(c[0]), i64::from(a[1]) - i64::from(c[1])];
    let cb = [i64::from(b[0]) - i64::from(c[0]), i64::from(b[1]) - i64::from(c[1])];

    let dot = ca[0] * cb[0] + ca[1] * cb[1];
    let len_a = ca[0] * ca[0] + ca[1] * ca[1];
    let len_b = cb[0] * cb[0] + cb[1] * cb[1];

    dot == 0 && len_a == len_b && len_a > 0
}

/// Sign of the orientation of `abc`.
#[cfg(feature = "geogram")]
fn orientation([a, b, c]: [Vertex; 3]) -> i8 {
    use geogram_predicates as gp;

    let to_f64 = |v: Vertex| [f64::from(v[0]), f64::from(v[1])];
    gp::orient_2d(&to_f64(a), &to_f64(b), &to_f64(c)).signum() as i8
}

/// Sign of the orientation of `abc`.
#[cfg(not(feature = "geogram"))]
fn orientation(corners: [Vertex; 3]) -> i8 {
    cross(corners).signum() as i8
}
