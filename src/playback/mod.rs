//! Real-time playback of compiled timelines.

/// Pacing (the only blocking point of playback).
pub mod pacer;
/// Playback state machine and loop.
pub mod scheduler;
