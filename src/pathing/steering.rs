//! Potential-field route simulation
//!
//! A point walks from start to goal in fixed steps, pushed sideways by any
//! unit it gets too close to. This gives local avoidance only: there is no
//! search, and a route that hits the step cap simply ends where it stopped.

use crate::core::config::{
    PATH_CAPTURE_RADIUS, PATH_DEGENERATE_LEN, PATH_FALLBACK_HEADING, PATH_MAX_STEPS,
    PATH_MIN_OBSTACLE_DIST, PATH_OBSTACLE_BUFFER, PATH_PUSH_STRENGTH, PATH_STEP,
    PATH_WAYPOINT_SPACING,
};
use crate::core::types::Vec2;

/// A circle the walker steers around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Repulsion felt at `point`, zero outside the safe distance
    fn push(&self, point: Vec2) -> Vec2 {
        let safe = self.radius + PATH_OBSTACLE_BUFFER;
        let offset = point - self.center;
        let dist = offset.length();

        if dist >= safe || dist <= PATH_MIN_OBSTACLE_DIST {
            return Vec2::ZERO;
        }

        let penetration = (safe - dist) / safe;
        offset / dist * penetration * PATH_PUSH_STRENGTH
    }
}

/// Simulate a route from `start` to `goal` and return its thinned waypoints
///
/// The first waypoint is always `start`. When the walker gets within the
/// capture radius, the goal itself is appended as the final waypoint.
pub fn simulate_route(start: Vec2, goal: Vec2, obstacles: &[Obstacle]) -> Vec<Vec2> {
    let mut waypoints = vec![start];
    let mut position = start;

    for _ in 0..PATH_MAX_STEPS {
        if position.distance(goal) < PATH_CAPTURE_RADIUS {
            if waypoints.last() != Some(&goal) {
                waypoints.push(goal);
            }
            return waypoints;
        }

        let mut heading = (goal - position).normalize_or_zero();
        for obstacle in obstacles {
            heading += obstacle.push(position);
        }

        let len = heading.length();
        let direction = if len > PATH_DEGENERATE_LEN {
            heading / len
        } else {
            Vec2::new(PATH_FALLBACK_HEADING.0, PATH_FALLBACK_HEADING.1)
        };

        position += direction * PATH_STEP;

        // The first step is always recorded so short routes keep a direction
        let keep = waypoints.len() == 1
            || waypoints
                .last()
                .is_some_and(|last| position.distance(*last) > PATH_WAYPOINT_SPACING);
        if keep {
            waypoints.push(position);
        }
    }

    tracing::trace!(?start, ?goal, "route hit the step cap before reaching its goal");
    waypoints
}

/// Total polyline length
pub fn route_length(waypoints: &[Vec2]) -> f32 {
    waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
}
