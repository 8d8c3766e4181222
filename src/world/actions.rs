//! Mutation primitives shared by AI commanders and player input
//!
//! Every primitive is a checked no-op on bad input and returns whether it
//! did anything. Nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::core::config::{TROOP_MIN_SEND, TROOP_SENDER_RESERVE};
use crate::core::types::UnitId;
use crate::spells::{self, SpellKind};
use crate::transit::Troop;
use crate::units::UnitKind;
use crate::world::events::GameEventType;
use crate::world::state::Battlefield;

/// A request to change the battlefield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SendTroops {
        from: UnitId,
        to: UnitId,
        amount: i32,
    },
    Upgrade {
        unit: UnitId,
    },
    Evolve {
        unit: UnitId,
        into: UnitKind,
    },
    CastSpell {
        caster: UnitId,
        spell: SpellKind,
        target: UnitId,
    },
}

impl Battlefield {
    /// Carry out `action`; returns whether anything changed
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SendTroops { from, to, amount } => self.send_troops(from, to, amount),
            Action::Upgrade { unit } => self.upgrade_unit(unit),
            Action::Evolve { unit, into } => self.evolve_unit(unit, into).is_some(),
            Action::CastSpell {
                caster,
                spell,
                target,
            } => self.cast_spell(caster, spell, target),
        }
    }

    /// Launch `amount` health from `from` toward `to` along the cached route
    ///
    /// Requires a live source with at least `amount` health, a live target and
    /// a non-empty route. The source pays immediately.
    pub fn spawn_troop(&mut self, from: UnitId, to: UnitId, amount: i32) -> bool {
        if from == to || amount <= 0 || !self.roster.contains(to) {
            return false;
        }
        let Some(route) = self.graph.get_path(from, to) else {
            return false;
        };
        let Some(source) = self.roster.get_mut(from) else {
            return false;
        };
        if source.health < amount {
            return false;
        }

        let troop = Troop::new(
            from,
            to,
            source.side,
            amount,
            route.to_vec(),
            source.attacking_speed,
        );
        source.health -= amount;
        let side = source.side;
        self.troops.push(troop);

        tracing::debug!(%from, %to, amount, ?side, "troop sent");
        self.events.push(
            GameEventType::TroopSent {
                from,
                to,
                side,
                amount,
            },
            format!("{from} sent {amount} to {to}"),
            self.tick,
        );
        true
    }

    /// Send a troop while keeping a reserve at the source
    ///
    /// A sender that would drop to the reserve or below sends only what is
    /// above it, and nothing at all if that is less than the minimum send.
    pub fn send_troops(&mut self, from: UnitId, to: UnitId, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        let Some(health) = self.roster.get(from).map(|u| u.health) else {
            return false;
        };

        let mut amount = amount;
        if health <= amount + TROOP_SENDER_RESERVE {
            amount = health - TROOP_SENDER_RESERVE;
            if amount < TROOP_MIN_SEND {
                return false;
            }
        }
        self.spawn_troop(from, to, amount)
    }

    /// Buy the next level for a unit, then refresh routes
    pub fn upgrade_unit(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.roster.get_mut(id) else {
            return false;
        };
        if !unit.perform_upgrade() {
            return false;
        }
        let (kind, level) = (unit.kind(), unit.level);

        tracing::debug!(unit = %id, %kind, level, "unit upgraded");
        self.events.push(
            GameEventType::UnitUpgraded {
                unit: id,
                kind,
                level,
            },
            format!("{kind} {id} reached level {level}"),
            self.tick,
        );
        self.recalculate_paths();
        true
    }

    /// Replace a Baby with a unit of kind `into`
    ///
    /// The new unit keeps position, side and leftover health, inherits the
    /// Baby's edges and is connected to every other unit. Routes are rebuilt
    /// before returning. The old handle is dead afterwards.
    pub fn evolve_unit(&mut self, id: UnitId, into: UnitKind) -> Option<UnitId> {
        let evolved = self.roster.get(id)?.evolved(into)?;
        let new_id = self.roster.replace(id, evolved)?;

        self.graph.relink(id, new_id);
        for other in self.roster.ids() {
            self.graph.add_edge(new_id, other);
        }
        self.recalculate_paths();

        tracing::debug!(old = %id, new = %new_id, %into, "baby evolved");
        self.events.push(
            GameEventType::UnitEvolved {
                old: id,
                new: new_id,
                into,
            },
            format!("{id} became {into} {new_id}"),
            self.tick,
        );
        Some(new_id)
    }

    /// Immediate cast: checks, pays, starts the cooldown and applies
    pub fn cast_spell(&mut self, caster: UnitId, spell: SpellKind, target: UnitId) -> bool {
        let Some((wizard, victim)) = self.roster.pair_mut(caster, target) else {
            return false;
        };
        if !spells::cast_spell(wizard, spell, victim) {
            return false;
        }
        self.record_cast(caster, spell, target);
        true
    }

    /// Resolve a prepared spell; the cooldown already started at preparation
    pub fn cast_prepared_spell(&mut self, caster: UnitId, spell: SpellKind, target: UnitId) -> bool {
        let Some((wizard, victim)) = self.roster.pair_mut(caster, target) else {
            return false;
        };
        if !spells::pay_and_apply(wizard, spell, victim) {
            return false;
        }
        self.record_cast(caster, spell, target);
        true
    }

    fn record_cast(&mut self, caster: UnitId, spell: SpellKind, target: UnitId) {
        self.events.push(
            GameEventType::SpellCast {
                caster,
                target,
                spell,
            },
            format!("{caster} cast {spell} on {target}"),
            self.tick,
        );
    }

    /// Rebuild every cached route from current positions
    pub fn recalculate_paths(&mut self) {
        self.graph.calculate_paths(&self.roster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Side, Vec2};
    use crate::units::Unit;

    fn field(units: Vec<Unit>) -> (Battlefield, Vec<UnitId>) {
        let mut field = Battlefield::new();
        let ids: Vec<UnitId> = units.into_iter().map(|u| field.roster.insert(u)).collect();
        field.graph.connect_all(&ids);
        field.recalculate_paths();
        (field, ids)
    }

    #[test]
    fn test_send_suppressed_when_reserve_too_thin() {
        let (mut field, ids) = field(vec![
            Unit::new(UnitKind::Warrior, Vec2::new(0.0, 0.0), 12, Side::Enemy),
            Unit::new(UnitKind::Warrior, Vec2::new(4.0, 0.0), 12, Side::Player),
        ]);

        assert!(!field.send_troops(ids[0], ids[1], 5));
        assert!(field.troops.is_empty());
        assert_eq!(field.roster.get(ids[0]).unwrap().health, 12);
    }

    #[test]
    fn test_send_clamps_to_reserve() {
        let (mut field, ids) = field(vec![
            Unit::new(UnitKind::Warrior, Vec2::new(0.0, 0.0), 30, Side::Enemy),
            Unit::new(UnitKind::Warrior, Vec2::new(4.0, 0.0), 12, Side::Player),
        ]);

        assert!(field.send_troops(ids[0], ids[1], 25));
        assert_eq!(field.troops[0].health_amount, 20);
        assert_eq!(field.troops[0].side, Side::Enemy);
        assert_eq!(field.roster.get(ids[0]).unwrap().health, 10);
    }

    #[test]
    fn test_spawn_needs_route() {
        let mut field = Battlefield::new();
        let a = field
            .roster
            .insert(Unit::new(UnitKind::Warrior, Vec2::ZERO, 50, Side::Player));
        let b = field
            .roster
            .insert(Unit::new(UnitKind::Warrior, Vec2::new(3.0, 0.0), 50, Side::Enemy));

        assert!(!field.spawn_troop(a, b, 10));
        field.graph.add_edge(a, b);
        field.recalculate_paths();
        assert!(field.spawn_troop(a, b, 10));
        assert!(!field.spawn_troop(a, a, 10));
        assert!(!field.spawn_troop(a, b, 0));
        assert!(!field.spawn_troop(a, b, 41));
    }

    #[test]
    fn test_evolve_relinks_and_kills_old_handle() {
        let (mut field, ids) = field(vec![
            Unit::new(UnitKind::Baby, Vec2::new(0.0, 0.0), 12, Side::Player),
            Unit::new(UnitKind::Warrior, Vec2::new(4.0, 0.0), 40, Side::Enemy),
        ]);

        let wizard = field.evolve_unit(ids[0], UnitKind::Wizard).unwrap();
        assert!(field.roster.get(ids[0]).is_none());
        assert_eq!(field.roster.get(wizard).unwrap().health, 2);
        assert!(field.graph.has_path(wizard, ids[1]));
        assert!(field.graph.has_path(ids[1], wizard));
        assert!(!field.graph.has_path(ids[1], ids[0]));
        assert!(field.evolve_unit(ids[0], UnitKind::Warrior).is_none());
    }

    #[test]
    fn test_upgrade_action_logs_event() {
        let (mut field, ids) = field(vec![Unit::new(
            UnitKind::Warrior,
            Vec2::ZERO,
            5,
            Side::Player,
        )]);
        assert!(field.apply(Action::Upgrade { unit: ids[0] }));
        assert_eq!(field.roster.get(ids[0]).unwrap().level, 2);
        assert_eq!(field.events.len(), 1);
        assert!(!field.apply(Action::Upgrade { unit: ids[0] }));
    }

    #[test]
    fn test_cast_spell_action() {
        let mut wizard = Unit::new(UnitKind::Wizard, Vec2::ZERO, 100, Side::Enemy);
        wizard.level = 3;
        let (mut field, ids) = field(vec![
            wizard,
            Unit::new(UnitKind::Tower, Vec2::new(5.0, 0.0), 20, Side::Player),
        ]);

        assert!(field.apply(Action::CastSpell {
            caster: ids[0],
            spell: SpellKind::Convert,
            target: ids[1],
        }));
        assert_eq!(field.roster.get(ids[1]).unwrap().side, Side::Enemy);
        assert_eq!(field.roster.get(ids[0]).unwrap().health, 50);
        assert!(!field.cast_spell(ids[0], SpellKind::Convert, ids[0]));
    }
}
