//! Core game module - states, events, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod error;
mod events;
mod plugin;
mod rng;
mod states;
mod tween;

pub use error::DataLoadError;
pub use events::*;
pub use plugin::{enter_game, CorePlugin};
pub use rng::SimRng;
pub use states::*;
pub use tween::*;
