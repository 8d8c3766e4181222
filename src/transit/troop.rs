//! A health packet travelling along a cached route

use serde::{Deserialize, Serialize};

use crate::core::config::{TROOP_PROGRESS_MULTIPLIER, TROOP_SPEED_SCALE};
use crate::core::types::{Side, UnitId, Vec2};

/// Troop in flight between two units
///
/// `side` is set when the troop is sent. The battlefield refreshes it from
/// the source each tick while the source's handle is alive, so a source
/// captured mid-flight takes its troops along. Once the source is replaced
/// the troop keeps the last side it saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Troop {
    pub source: UnitId,
    pub target: UnitId,
    pub side: Side,
    pub health_amount: i32,
    pub waypoints: Vec<Vec2>,
    /// Fractional index into `waypoints`
    pub progress: f32,
    pub speed: f32,
    pub position: Vec2,
    pub arrived: bool,
}

impl Troop {
    /// A troop with no route arrives immediately
    pub fn new(
        source: UnitId,
        target: UnitId,
        side: Side,
        health_amount: i32,
        waypoints: Vec<Vec2>,
        attacking_speed: i32,
    ) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        let arrived = waypoints.is_empty();
        Self {
            source,
            target,
            side,
            health_amount,
            waypoints,
            progress: 0.0,
            speed: attacking_speed as f32 * TROOP_SPEED_SCALE,
            position,
            arrived,
        }
    }

    pub fn update(&mut self, dt_seconds: f32) {
        if self.arrived {
            return;
        }

        self.progress += self.speed * dt_seconds * TROOP_PROGRESS_MULTIPLIER;

        let last_index = self.waypoints.len().saturating_sub(1);
        if self.progress >= last_index as f32 {
            self.progress = last_index as f32;
            if let Some(&end) = self.waypoints.last() {
                self.position = end;
            }
            self.arrived = true;
            return;
        }

        self.position = self.interpolate();
    }

    /// Catmull-Rom point at the current progress, control points clamped to the route
    fn interpolate(&self) -> Vec2 {
        let last = self.waypoints.len() - 1;
        let i = self.progress.floor() as usize;
        let t = self.progress - i as f32;

        let p0 = self.waypoints[i.saturating_sub(1)];
        let p1 = self.waypoints[i.min(last)];
        let p2 = self.waypoints[(i + 1).min(last)];
        let p3 = self.waypoints[(i + 2).min(last)];

        catmull_rom(p0, p1, p2, p3, t)
    }

    /// Tower damage; never drops below zero
    pub fn reduce_health(&mut self, amount: i32) {
        self.health_amount = (self.health_amount - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health_amount <= 0
    }

    /// Still on the map and worth shooting at
    pub fn is_active(&self) -> bool {
        !self.arrived && !self.is_dead()
    }
}

/// Uniform Catmull-Rom segment between `p1` and `p2`
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}
