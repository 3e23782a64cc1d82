// Type aliases for grid values.
pub type GridCoord = u32;
pub type Vertex = [GridCoord; 2];
/// `(ax, ay, bx, by)`, the two stored corners of a hierarchy triangle.
pub type TriangleCoords = [GridCoord; 4];
/// Corners `a`, `b` and `c` of a hierarchy triangle, right angle at `c`.
pub type TriangleCorners = [Vertex; 3];

// Type aliases for data indices.
pub type VertexIdx = u32;
pub type Triangle = [VertexIdx; 3];

// Type aliases for lookup indices.
// This is to know, when a function accepts or returns a usize, what it is for.
pub type GridIdx = usize;
pub type TriangleId = usize;
