//! voxspin turns a static voxel scene into a persistence-of-vision schedule for a spinning,
//! two-sided LED panel, and streams that schedule to the panel in real time.
//!
//! # Pipeline overview
//!
//! 1. **Geometry**: `PhysicalConfig -> GeometryTable` (which cross-section cells the arm passes
//!    over at each [`Tick`] of a sweep). Built once per configuration.
//! 2. **Compile**: `Scene + GeometryTable -> Timeline` (ordered frames with delays).
//! 3. **Rasterize**: `Frame -> MonochromeBuffer` (packed 64 x 32, 1 bpp, 256 bytes).
//! 4. **Play**: the [`Scheduler`] streams rasterized frames into a [`FrameTransport`], pacing
//!    them with a [`Pacer`] and flipping the mirror flag every half rotation.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: table building and compilation are pure for a given input.
//! - **Lossy at the edges only**: off-panel or unlit pixels are dropped silently; invalid
//!   configuration fails before playback starts; transport failures end the session.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod config;
mod foundation;
mod geometry;
mod playback;
mod render;
mod scene;
mod transport;

pub use compile::timeline::{Activation, Frame, Timeline, TimelineStats, compile_timeline};
pub use config::player::{PlayerConfig, TransportKind};
pub use foundation::core::{
    FRAME_BYTES, PANEL_HEIGHT, PANEL_WIDTH, PhysicalConfig, ROW_BYTES, Rgb8, TICKS_PER_SECOND,
    Tick,
};
pub use foundation::error::{VoxError, VoxResult};
pub use geometry::table::{ActivationRule, ArmPixel, GeometryTable, Side};
pub use playback::pacer::{Pacer, RealtimePacer, RecordingPacer};
pub use playback::scheduler::{
    PlaybackOpts, PlaybackState, PlaybackStats, Scheduler, SessionState, play,
};
pub use render::patterns::{alternating_lines, slice_row};
pub use render::raster::{MonochromeBuffer, PanelActivation, rasterize};
pub use scene::model::Scene;
pub use transport::net::{TcpTransport, UdpTransport};
pub use transport::sink::{FrameTransport, InMemoryTransport};
