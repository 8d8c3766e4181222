//! Jelly Skirmish - two-faction unit skirmish simulation
//!
//! Units on a small arena trade health by sending troops along cached
//! steering routes. Towers shoot passing troops, wizards cast spells, and
//! an autonomous commander plays the enemy side.

pub mod ai;
pub mod core;
pub mod pathing;
pub mod spells;
pub mod transit;
pub mod units;
pub mod world;
