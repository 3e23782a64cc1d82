#![no_main]

use libfuzzer_sys::fuzz_target;
use rtin::{ErrorField, RtinError, TriangleIndex};

fuzz_target!(|terrain: Vec<f64>| {
    let index = TriangleIndex::new(5).unwrap();

    match ErrorField::compute(&index, &terrain) {
        Ok(errors) => assert_eq!(errors.errors().len(), 25),
        Err(e) => assert_eq!(
            e.downcast_ref::<RtinError>(),
            Some(&RtinError::TerrainLengthMismatch {
                expected: 25,
                actual: terrain.len()
            })
        ),
    }
});
