//! Shared type definitions for the Wormfarm simulation.
//!
//! This crate holds the small value types that cross crate boundaries:
//! identifiers, points, brain decisions, and name records.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for worms and apples
//! - [`structs`] -- [`Point`], [`Decision`], and [`NameRecord`]

pub mod ids;
pub mod structs;

pub use ids::{AppleId, WormId};
pub use structs::{Decision, NameRecord, Point};
