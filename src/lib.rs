//! # rtin
//!
//! An implementation of RTIN (Right-Triangulated Irregular Network) mesh simplification for square heightmaps
//! of size `2^n+1`.
//!
//! 1. [`TriangleIndex`] precomputes the implicit right-triangle hierarchy once per grid size.
//! 2. [`ErrorField`] computes, once per heightfield, the worst approximation error below every hierarchy vertex.
//! 3. [`MeshExtractor`] cuts a [`Mesh`] out of the hierarchy for any maximum error, as often as needed.
//!
//! ```
//! use rtin::TriangleIndex;
//!
//! let grid_size = 9;
//! let terrain: Vec<f64> = (0..grid_size * grid_size)
//!     .map(|i| ((i % grid_size) * (i / grid_size)) as f64)
//!     .collect();
//!
//! let index = TriangleIndex::new(grid_size).unwrap();
//! let tile = index.create_tile(terrain).unwrap();
//!
//! let coarse = tile.mesh(10.0);
//! let fine = tile.mesh(0.0);
//!
//! assert!(coarse.num_triangles() <= fine.num_triangles());
//! assert!(fine.is_sound(&index));
//! ```
#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

pub use error::RtinError;
pub use errors::ErrorField;
pub use extract::{MeshExtractor, VertexIndexMap};
pub use index::TriangleIndex;
pub use mesh::Mesh;
pub use tile::Tile;
pub use utils::types::{GridCoord, Triangle, TriangleCoords, Vertex, VertexIdx};

pub mod error;
pub mod errors;
pub mod extract;
pub mod index;
pub mod mesh;
pub mod tile;
mod utils;
