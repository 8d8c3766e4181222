//! Observable outcomes of a tick
//!
//! Every mutation primitive reports what it did here, whether it was driven
//! by an AI commander or by player input.

use serde::{Deserialize, Serialize};

use crate::ai::Strategy;
use crate::core::types::{Side, Tick, UnitId};
use crate::spells::SpellKind;
use crate::transit::ArrivalOutcome;
use crate::units::UnitKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: Tick,
    pub event_type: GameEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventType {
    TroopSent {
        from: UnitId,
        to: UnitId,
        side: Side,
        amount: i32,
    },
    TroopArrived {
        target: UnitId,
        side: Side,
        outcome: ArrivalOutcome,
    },
    /// Target was replaced or removed while the troop was in flight
    TroopLost { target: UnitId, side: Side },
    TroopDestroyed { source: UnitId, side: Side },
    TowerFired { tower: UnitId },
    UnitUpgraded {
        unit: UnitId,
        kind: UnitKind,
        level: u8,
    },
    UnitEvolved {
        old: UnitId,
        new: UnitId,
        into: UnitKind,
    },
    SpellPrepared { caster: UnitId, spell: SpellKind },
    SpellCast {
        caster: UnitId,
        target: UnitId,
        spell: SpellKind,
    },
    StrategyChanged { side: Side, strategy: Strategy },
}

/// Events collected during one tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: GameEventType, description: String, tick: Tick) {
        self.events.push(GameEvent {
            tick,
            event_type,
            description,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn count_matching(&self, pred: impl Fn(&GameEventType) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event_type)).count()
    }
}
