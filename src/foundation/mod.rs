/// Panel constants, timing units, colors and the physical arm description.
pub mod core;
/// Error taxonomy shared by every module.
pub mod error;
