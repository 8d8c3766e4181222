//! Route planning between units
//!
//! `steering` walks a single route through a field of circular obstacles;
//! `graph` owns which units are connected and caches one route per ordered
//! pair.

pub mod graph;
pub mod steering;

pub use graph::PathGraph;
pub use steering::{route_length, simulate_route, Obstacle};
