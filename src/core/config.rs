//! Simulation constants - all tunable values in one place
//!
//! Distances are in arena units (the default arena is 16 x 8).
//! Times are in seconds unless the name says otherwise.

// Path graph steering
pub const PATH_STEP: f32 = 0.05;
pub const PATH_MAX_STEPS: usize = 2000;
pub const PATH_CAPTURE_RADIUS: f32 = 0.2;
pub const PATH_WAYPOINT_SPACING: f32 = 0.15;
pub const PATH_OBSTACLE_BUFFER: f32 = 0.5; // Added to each obstacle's size
pub const PATH_PUSH_STRENGTH: f32 = 4.0;
pub const PATH_MIN_OBSTACLE_DIST: f32 = 0.01; // Below this the push direction is undefined
pub const PATH_DEGENERATE_LEN: f32 = 0.01;
pub const PATH_FALLBACK_HEADING: (f32, f32) = (0.7, 0.3);

// Troop transit
pub const TROOP_SPEED_SCALE: f32 = 0.5; // Applied to the source's attacking speed
pub const TROOP_PROGRESS_MULTIPLIER: f32 = 2.0;

// Passive unit update
pub const UNIT_TIMER_START: f32 = 1.0;
pub const SICKNESS_DRAIN_PER_SECOND: i32 = 1;
pub const OVERFLOW_DECAY_PER_SECOND: i32 = 1;

// Tower fire
pub const TOWER_ATTACK_RADIUS: f32 = 2.0;
pub const TOWER_DAMAGE: i32 = 2;
pub const TOWER_ATTACK_INTERVAL_BASE: f32 = 0.5;
pub const TOWER_INTERVAL_STEP: f32 = 0.08; // Interval reduction per upgrade
pub const ATTACK_EFFECT_DURATION: f32 = 0.3;

// Spells
pub const SPELL_COOLDOWN: f32 = 10.0;
pub const SPELL_PREPARATION: f32 = 2.0;

// Arena
pub const ARENA_WIDTH: f32 = 16.0;
pub const ARENA_HEIGHT: f32 = 8.0;

// Player input
pub const PLAYER_SEND_FRACTION_DIVISOR: i32 = 2; // Drag-to-send moves half the health

// Decision engine
pub const AI_INITIAL_INTERVAL: f32 = 2.0;
pub const AI_INTERVAL_MIN: f32 = 1.5;
pub const AI_INTERVAL_MAX: f32 = 2.5;
pub const AI_CAST_CHANCE_PER_FRAME: f32 = 0.05;
pub const AI_CAST_THRESHOLD: f32 = 30.0;
pub const AI_EARLY_UPGRADE_HEALTH_RATIO: f32 = 0.7;
pub const AI_EARLY_UPGRADE_CHANCE: f32 = 0.5;
pub const AI_EARLY_EVOLVE_CHANCE: f32 = 0.7;

// Troop sizing
pub const TROOP_MIN_SEND: i32 = 5;
pub const TROOP_MAX_SEND: i32 = 100;
pub const TROOP_SEND_FRACTION: f32 = 0.6;
pub const TROOP_SENDER_RESERVE: i32 = 10; // Health a sender always keeps
