//! Physics module - collision layers and the spatial query seam.
//!
//! Gameplay code asks spatial questions through the `SpatialQuery` trait.
//! `RapierSpatialQuery` answers them from the live Rapier context; unit
//! tests answer them from an in-memory scene.

mod layers;
mod query;

pub use layers::*;
pub use query::{RapierSpatialQuery, RayHit, SpatialQuery, SweepHit, MAX_SWEEP_HITS};
