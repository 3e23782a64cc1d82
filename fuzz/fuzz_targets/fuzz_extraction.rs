#![no_main]

use libfuzzer_sys::fuzz_target;
use rtin::TriangleIndex;

fuzz_target!(|data: (u8, Vec<f64>, f64)| {
    let (exponent, mut terrain, max_error) = data;

    // grid sizes 3 to 129
    let grid_size = (1 << (1 + exponent % 7)) + 1;
    terrain.resize(grid_size * grid_size, 0.0);

    let index = TriangleIndex::new(grid_size).unwrap();
    let tile = index.create_tile(terrain).unwrap();
    let mesh = tile.mesh(max_error);

    assert!(mesh.is_sound(&index));
    assert!(mesh.num_vertices() <= grid_size * grid_size);
    assert!(mesh.num_triangles() <= 2 * (grid_size - 1) * (grid_size - 1));
});
