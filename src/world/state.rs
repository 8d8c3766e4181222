//! Per-frame coordinator
//!
//! `GameState` is an explicitly owned context: nothing is global, so several
//! simulations can run side by side and every run is reproducible from its
//! seed and the sequence of frame deltas.

use serde::{Deserialize, Serialize};

use crate::ai::{AiCommander, AiProfile, DecisionContext};
use crate::core::types::{ms_to_seconds, Side, Tick, UnitId};
use crate::pathing::PathGraph;
use crate::spells::{can_cast, SpellKind, SpellQueue};
use crate::transit::{age_effects, fire_towers, resolve_arrival, ArrivalOutcome, AttackEffect, Troop};
use crate::units::{Roster, UnitKind};
use crate::world::actions::Action;
use crate::world::events::{EventLog, GameEventType};

/// Everything the mutation primitives touch
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    pub roster: Roster,
    pub graph: PathGraph,
    pub troops: Vec<Troop>,
    pub effects: Vec<AttackEffect>,
    /// Events raised during the current tick
    pub events: EventLog,
    pub tick: Tick,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect every unit to every other and build the route cache
    pub fn connect_all(&mut self) {
        let ids = self.roster.ids();
        self.graph.connect_all(&ids);
        self.recalculate_paths();
    }

    fn update_units(&mut self, dt_seconds: f32) {
        for (_, unit) in self.roster.iter_mut() {
            unit.update(dt_seconds);
        }
    }

    fn update_troops(&mut self, dt_seconds: f32) {
        for troop in &mut self.troops {
            troop.update(dt_seconds);
        }
    }

    /// Troops fight for their source's current side while it is alive
    fn current_side(&self, troop: &Troop) -> Side {
        self.roster
            .get(troop.source)
            .map_or(troop.side, |source| source.side)
    }

    fn sync_troop_sides(&mut self) {
        let roster = &self.roster;
        for troop in &mut self.troops {
            if let Some(source) = roster.get(troop.source) {
                troop.side = source.side;
            }
        }
    }

    fn tower_attacks(&mut self) {
        self.sync_troop_sides();
        let before = self.effects.len();
        fire_towers(&mut self.roster, &mut self.troops, &mut self.effects);
        for effect in &self.effects[before..] {
            self.events.push(
                GameEventType::TowerFired {
                    tower: effect.tower,
                },
                format!("tower {} fired", effect.tower),
                self.tick,
            );
        }
    }

    /// Land arrived troops and purge dead ones
    fn resolve_arrivals(&mut self) {
        let troops = std::mem::take(&mut self.troops);
        for troop in troops {
            if troop.arrived && !troop.is_dead() {
                self.land(&troop);
            } else if troop.is_dead() {
                self.events.push(
                    GameEventType::TroopDestroyed {
                        source: troop.source,
                        side: troop.side,
                    },
                    format!("troop from {} destroyed in transit", troop.source),
                    self.tick,
                );
            } else {
                self.troops.push(troop);
            }
        }
    }

    fn land(&mut self, troop: &Troop) {
        let side = self.current_side(troop);
        let Some(target) = self.roster.get_mut(troop.target) else {
            self.events.push(
                GameEventType::TroopLost {
                    target: troop.target,
                    side,
                },
                format!("troop for {} found nothing to land on", troop.target),
                self.tick,
            );
            return;
        };

        let outcome = resolve_arrival(target, side, troop.health_amount);
        if let ArrivalOutcome::Captured { new_health, .. } = outcome {
            tracing::debug!(
                target = %troop.target,
                side = ?side,
                new_health,
                "unit captured"
            );
        }
        self.events.push(
            GameEventType::TroopArrived {
                target: troop.target,
                side,
                outcome,
            },
            format!("troop of {} landed on {}", troop.health_amount, troop.target),
            self.tick,
        );
    }

    /// Sum of health on the (player, enemy) sides
    pub fn total_health(&self) -> (i32, i32) {
        self.roster
            .iter()
            .fold((0, 0), |(player, enemy), (_, unit)| match unit.side {
                Side::Player => (player + unit.health, enemy),
                Side::Enemy => (player, enemy + unit.health),
                Side::Neutral => (player, enemy),
            })
    }

    pub fn clear(&mut self) {
        self.roster.clear();
        self.graph.clear();
        self.troops.clear();
        self.effects.clear();
        self.events = EventLog::new();
    }
}

/// How the skirmish stands from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Victory,
    Defeat,
}

/// Player's currently selected unit; spell targeting lives in `SpellQueue`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub unit: Option<UnitId>,
}

/// The whole simulation
pub struct GameState {
    pub field: Battlefield,
    pub spells: SpellQueue,
    pub selection: Selection,
    enemy_ai: AiCommander,
    /// Optional commander playing the PLAYER side
    player_ai: Option<AiCommander>,
    elapsed: f32,
    seed: u64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_profile(AiProfile::default(), seed)
    }

    pub fn with_profile(profile: AiProfile, seed: u64) -> Self {
        Self {
            field: Battlefield::new(),
            spells: SpellQueue::new(),
            selection: Selection::default(),
            enemy_ai: AiCommander::for_side(Side::Enemy, profile, seed),
            player_ai: None,
            elapsed: 0.0,
            seed,
        }
    }

    /// Hand the PLAYER side to a second commander
    pub fn enable_autopilot(&mut self, profile: AiProfile) {
        let seed = self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);
        self.player_ai = Some(AiCommander::for_side(Side::Player, profile, seed));
    }

    pub fn tick(&self) -> Tick {
        self.field.tick
    }

    /// Simulated seconds since the start
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn enemy_ai(&self) -> &AiCommander {
        &self.enemy_ai
    }

    pub fn player_ai(&self) -> Option<&AiCommander> {
        self.player_ai.as_ref()
    }

    pub fn total_health(&self) -> (i32, i32) {
        self.field.total_health()
    }

    pub fn outcome(&self) -> Outcome {
        let roster = &self.field.roster;
        if roster.count_on_side(Side::Player) == 0 {
            Outcome::Defeat
        } else if roster.count_on_side(Side::Enemy) == 0 {
            Outcome::Victory
        } else {
            Outcome::Ongoing
        }
    }

    /// Advance one frame of `dt_ms` milliseconds and return what happened
    pub fn update(&mut self, dt_ms: f32) -> EventLog {
        let dt = ms_to_seconds(dt_ms);
        self.field.tick += 1;
        self.elapsed += dt;

        self.field.update_units(dt);
        self.field.update_troops(dt);
        self.field.tower_attacks();
        self.field.resolve_arrivals();
        age_effects(&mut self.field.effects, dt);
        self.update_spell_queue(dt);

        Self::run_commander(&mut self.enemy_ai, &mut self.field, dt);
        if let Some(ai) = self.player_ai.as_mut() {
            Self::run_commander(ai, &mut self.field, dt);
        }

        std::mem::take(&mut self.field.events)
    }

    fn run_commander(ai: &mut AiCommander, field: &mut Battlefield, dt: f32) {
        let side = ai.side();
        let previous = ai.strategy();
        let orders = ai.update(dt, &DecisionContext::new(&field.roster, &field.graph, side));
        if ai.strategy() != previous {
            field.events.push(
                GameEventType::StrategyChanged {
                    side,
                    strategy: ai.strategy(),
                },
                format!("{side:?} switched to {}", ai.strategy()),
                field.tick,
            );
        }
        apply_all(field, orders);

        let casts = ai.plan_spells(&DecisionContext::new(&field.roster, &field.graph, side));
        apply_all(field, casts);
    }

    fn update_spell_queue(&mut self, dt: f32) {
        let roster = &self.field.roster;
        self.spells.update(dt, |caster| {
            roster
                .get(caster)
                .is_some_and(|unit| unit.side == Side::Player && unit.is_kind(UnitKind::Wizard))
        });
    }

    /// Start preparing `spell` on a player wizard; the cooldown starts now
    /// and health is paid when the spell lands
    pub fn prepare_spell(&mut self, caster: UnitId, spell: SpellKind) -> bool {
        let Some(wizard) = self.field.roster.get_mut(caster) else {
            return false;
        };
        if wizard.side != Side::Player || !can_cast(wizard, spell) {
            return false;
        }
        if !self.spells.prepare(caster, spell) {
            return false;
        }
        if let Some(book) = wizard.spell_book_mut() {
            book.start_cooldown(spell);
        }

        self.field.events.push(
            GameEventType::SpellPrepared { caster, spell },
            format!("{caster} began preparing {spell}"),
            self.field.tick,
        );
        true
    }

    /// Apply a player action through the same primitives the AI uses
    pub fn apply(&mut self, action: Action) -> bool {
        self.field.apply(action)
    }

    /// Wipe the field for a new scenario; commanders return to their opening stance
    pub fn reset(&mut self) {
        self.field.clear();
        self.field.tick = 0;
        self.spells.clear();
        self.selection = Selection::default();
        self.elapsed = 0.0;
        self.enemy_ai.reset();
        if let Some(ai) = self.player_ai.as_mut() {
            ai.reset();
        }
    }
}

fn apply_all(field: &mut Battlefield, actions: Vec<Action>) {
    for action in actions {
        if !field.apply(action) {
            tracing::trace!(?action, "action skipped");
        }
    }
}
