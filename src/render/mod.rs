//! Monochrome panel rasterization.
//!
//! Frames reach the panel as packed 1-bit bitmaps; see [`raster::MonochromeBuffer`].

/// Bring-up test patterns.
pub mod patterns;
/// Activation list to packed bitmap.
pub mod raster;
