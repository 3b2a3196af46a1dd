/// Voxel scene model and JSON loading.
pub mod model;
