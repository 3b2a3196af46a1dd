//! Frame transports.
//!
//! The playback scheduler pushes one packed buffer per frame into a [`sink::FrameTransport`].

/// TCP and UDP transports.
pub mod net;
/// Transport trait and the in-memory transport.
pub mod sink;
