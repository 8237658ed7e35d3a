//! Navigation module - destination following for autonomous agents.
//!
//! A deliberately simple service: agents walk straight toward their
//! destination inside a rectangular walkable area. Gameplay code only uses
//! the `NavAgent` surface, so a navmesh-backed implementation can replace
//! the steering system without touching the AI.

mod agent;
mod plugin;

pub use agent::{NavAgent, NavArea};
pub use plugin::{follow_paths, NavigationPlugin, NavigationSet};
