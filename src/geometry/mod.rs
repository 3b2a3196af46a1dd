//! Polar geometry of the spinning arm.
//!
//! The [`table::GeometryTable`] answers "at offset T, which cross-section cells does the arm
//! pass over, and with which LED?" for one fixed [`crate::PhysicalConfig`].

/// Offset-to-cell table builder.
pub mod table;
