//! AI Commander - one side's decision engine
//!
//! Runs a strategy cycle on a randomized interval and a spell pass every
//! frame. Decisions come back as `Action`s; the caller applies them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai::context::DecisionContext;
use crate::ai::profile::AiProfile;
use crate::ai::spellcaster::{best_target, choose_spell};
use crate::ai::strategy::{choose_strategy, SideAnalysis, Strategy};
use crate::ai::tactics::{
    evolution_choice, find_nearest, find_strategic, find_weakest, Tactic, TroopSizing,
};
use crate::core::config::{AI_INITIAL_INTERVAL, AI_INTERVAL_MAX, AI_INTERVAL_MIN};
use crate::core::types::{Side, UnitId};
use crate::units::{Unit, UnitKind};
use crate::world::actions::Action;

pub struct AiCommander {
    side: Side,
    profile: AiProfile,
    sizing: TroopSizing,
    strategy: Strategy,
    aggression: f32,
    decision_timer: f32,
    decision_interval: f32,
    last_analysis: Option<SideAnalysis>,
    cycles: u64,
    rng: ChaCha8Rng,
}

impl AiCommander {
    /// Commander for the ENEMY side with a fixed seed
    pub fn new(profile: AiProfile) -> Self {
        Self::with_seed(profile, 42)
    }

    /// Commander for the ENEMY side with a specific RNG seed
    pub fn with_seed(profile: AiProfile, seed: u64) -> Self {
        Self::for_side(Side::Enemy, profile, seed)
    }

    pub fn for_side(side: Side, profile: AiProfile, seed: u64) -> Self {
        let strategy = Strategy::default();
        Self {
            side,
            decision_timer: 0.0,
            decision_interval: AI_INITIAL_INTERVAL,
            profile,
            sizing: TroopSizing::default(),
            strategy,
            aggression: strategy.aggression(),
            last_analysis: None,
            cycles: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn aggression(&self) -> f32 {
        self.aggression
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_analysis(&self) -> Option<&SideAnalysis> {
        self.last_analysis.as_ref()
    }

    /// Seconds until the next strategy cycle
    pub fn decision_interval(&self) -> f32 {
        self.decision_interval
    }

    /// Back to the opening stance with a fresh timer
    pub fn reset(&mut self) {
        self.strategy = Strategy::default();
        self.aggression = self.strategy.aggression();
        self.decision_timer = 0.0;
        self.decision_interval = AI_INITIAL_INTERVAL;
        self.last_analysis = None;
        self.cycles = 0;
    }

    /// Advance the cycle timer; when it fires, re-pick the strategy and plan
    /// one action per own unit
    pub fn update(&mut self, dt_seconds: f32, context: &DecisionContext) -> Vec<Action> {
        self.decision_timer += dt_seconds;
        if self.decision_timer < self.decision_interval {
            return Vec::new();
        }

        let analysis = context.analyze();
        let previous = self.strategy;
        self.strategy = choose_strategy(&analysis);
        self.aggression = self.strategy.aggression();
        self.last_analysis = Some(analysis);
        if self.strategy != previous {
            tracing::debug!(
                side = ?self.side,
                from = %previous,
                to = %self.strategy,
                own_power = analysis.own_power,
                opponent_power = analysis.opponent_power,
                "strategy changed"
            );
        }

        let actions = self.plan_units(context);

        self.decision_timer = 0.0;
        self.decision_interval = self.rng.gen_range(AI_INTERVAL_MIN..=AI_INTERVAL_MAX);
        self.cycles += 1;

        actions
    }

    fn plan_units(&mut self, context: &DecisionContext) -> Vec<Action> {
        let mut actions = Vec::new();
        let targets = context.opponent_units();
        let neutrals = context.neutral_units();

        for (id, unit) in context.own_units() {
            if let Some(action) = self.early_upgrade(id, unit) {
                actions.push(action);
                continue;
            }

            let roll = self.rng.gen_range(0..100);
            let Some(tactic) = self
                .profile
                .dispatch
                .pick(self.strategy, unit.kind(), roll)
            else {
                continue;
            };

            let action = match tactic {
                Tactic::AttackWeakest => self.attack(context, id, unit, find_weakest(&targets)),
                Tactic::AttackStrategic => self.attack(context, id, unit, find_strategic(&targets)),
                Tactic::ConvertNeutral => {
                    self.attack(context, id, unit, find_nearest(unit, &neutrals))
                }
                Tactic::Upgrade => self.upgrade_action(id, unit),
            };
            actions.extend(action);
        }

        actions
    }

    /// Opportunistic level-up for a healthy unit
    fn early_upgrade(&mut self, id: UnitId, unit: &Unit) -> Option<Action> {
        let upgrades = &self.profile.upgrades;
        if (unit.health as f32) < unit.max_health as f32 * upgrades.health_ratio {
            return None;
        }
        let chance = if unit.is_kind(UnitKind::Baby) {
            upgrades.evolve_chance
        } else {
            upgrades.upgrade_chance
        };

        let action = self.upgrade_action(id, unit)?;
        (self.rng.gen::<f32>() < chance).then_some(action)
    }

    /// Upgrade, or evolve when the unit is a Baby
    fn upgrade_action(&self, id: UnitId, unit: &Unit) -> Option<Action> {
        if unit.is_kind(UnitKind::Baby) {
            let into = evolution_choice(self.strategy, unit)?;
            return Some(Action::Evolve { unit: id, into });
        }
        unit.can_upgrade().then_some(Action::Upgrade { unit: id })
    }

    fn attack(
        &mut self,
        context: &DecisionContext,
        from: UnitId,
        unit: &Unit,
        target: Option<UnitId>,
    ) -> Option<Action> {
        let to = target?;
        let amount = self.sizing.optimal_troop_size(unit.health, &mut self.rng);
        if amount <= 0 || !context.can_reach(from, to) {
            return None;
        }
        Some(Action::SendTroops { from, to, amount })
    }

    /// Per-frame wizard pass: each own wizard may try one cast
    pub fn plan_spells(&mut self, context: &DecisionContext) -> Vec<Action> {
        let targets = context.opponent_units();
        if targets.is_empty() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for (id, wizard) in context.own_units() {
            if !wizard.is_kind(UnitKind::Wizard) {
                continue;
            }
            if self.rng.gen::<f32>() >= self.profile.spells.cast_chance {
                continue;
            }

            let Some(spell) = choose_spell(wizard, self.strategy, &mut self.rng) else {
                continue;
            };
            if let Some((target, value)) = best_target(
                spell,
                &targets,
                self.strategy,
                self.profile.spells.cast_threshold,
            ) {
                tracing::debug!(caster = %id, %target, %spell, value, "AI cast planned");
                actions.push(Action::CastSpell {
                    caster: id,
                    spell,
                    target,
                });
            }
        }
        actions
    }
}
