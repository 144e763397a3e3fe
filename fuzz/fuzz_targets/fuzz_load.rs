#![no_main]

use std::sync::Arc;

use photon_voxels_port as port;

libfuzzer_sys::fuzz_target!(|input: &[u8]| test(input));

fn test(input: &[u8]) {
    let input = input.to_vec();
    let file: Arc<dyn port::file::Fileish> =
        Arc::new(port::file::NonDiskFile::from_name_and_data_source(
            String::new(),
            move || Ok(input.clone()),
        ));
    // Errors are expected; this is looking for panics.
    if let Ok(grid) = port::load_voxel_grid(Arc::clone(&file)) {
        assert!(grid.voxel_count() > 0);
    }
    let _result = port::load_bounding_box(file);
}
