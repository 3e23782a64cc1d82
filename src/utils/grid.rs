use super::types::{GridCoord, GridIdx, Vertex};

/// The largest grid whose vertices still fit a 1-based `u32` vertex index map.
pub const MAX_GRID_SIZE: usize = (1 << 15) + 1;

/// Checks that `grid_size - 1` is a power of two and that the grid has at least one parent triangle.
pub const fn is_valid_grid_size(grid_size: usize) -> bool {
    grid_size >= 3 && (grid_size - 1).is_power_of_two()
}

/// Flattens a grid vertex into its row-major position.
#[inline]
pub const fn grid_idx(v: Vertex, grid_size: usize) -> GridIdx {
    v[1] as usize * grid_size + v[0] as usize
}

/// Midpoint of the segment `ab`. Both ends always differ by an even amount on each axis.
#[inline]
pub const fn midpoint(a: Vertex, b: Vertex) -> Vertex {
    [(a[0] + b[0]) >> 1, (a[1] + b[1]) >> 1]
}

/// Recovers the right-angle corner `c` from the hypotenuse `ab`.
///
/// With `m` the midpoint of `ab`, `c = (mx + my - ay, my + ax - mx)`, i.e. `a` rotated by 90° about `m`.
/// The additions come first so the unsigned arithmetic never dips below zero for triangles on the grid.
#[inline]
pub const fn third_corner(a: Vertex, b: Vertex) -> Vertex {
    let [mx, my] = midpoint(a, b);
    [mx + my - a[1], my + a[0] - mx]
}

/// Grid (Manhattan) distance between two vertices.
#[inline]
pub const fn manhattan(a: Vertex, b: Vertex) -> GridCoord {
    a[0].abs_diff(b[0]) + a[1].abs_diff(b[1])
}

/// Maximum of two errors where a `NaN` on either side wins.
///
/// [`f64::max`] drops `NaN` operands, which would hide malformed elevations from the error field.
#[inline]
pub fn max_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
