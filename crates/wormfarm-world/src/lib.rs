//! Arena geometry, boundary policies, and random sampling for the
//! Wormfarm simulation.
//!
//! # Modules
//!
//! - [`arena`] -- [`Arena`]: validated spawn box plus boundary policy,
//!   with rejection sampling of spawn positions.
//! - [`boundary`] -- [`Boundary`] shapes (rectangle, circle) and the
//!   [`BoundingBox`] used as the spawn sampling domain.
//! - [`error`] -- Error types for arena construction and sampling.
//! - [`geometry`] -- Distance, angle conversion, uniform and normal
//!   sampling, and region predicates.

pub mod arena;
pub mod boundary;
pub mod error;
pub mod geometry;

pub use arena::{Arena, MAX_SPAWN_ATTEMPTS};
pub use boundary::{Boundary, BoundingBox};
pub use error::WorldError;
