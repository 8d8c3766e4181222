//! Coordinator integration tests

use jelly_skirmish::ai::AiProfile;
use jelly_skirmish::core::types::{Side, Vec2};
use jelly_skirmish::spells::SpellKind;
use jelly_skirmish::units::{Unit, UnitKind};
use jelly_skirmish::world::{
    load_scenario, load_scenario_or_default, GameEventType, GameState, Outcome, PlayerInput,
    Scenario,
};

fn run(seed: u64, ticks: usize) -> (Vec<String>, (i32, i32)) {
    let scenario = load_scenario("gauntlet").expect("Should load gauntlet");
    let mut state = GameState::from_scenario(&scenario, AiProfile::default(), seed).unwrap();
    state.enable_autopilot(AiProfile::default());

    let mut trace = Vec::new();
    for _ in 0..ticks {
        let log = state.update(16.0);
        trace.extend(log.iter().map(|e| format!("{} {}", e.tick, e.description)));
    }
    (trace, state.total_health())
}

#[test]
fn test_runs_are_reproducible_from_seed() {
    let (a, health_a) = run(21, 600);
    let (b, health_b) = run(21, 600);
    assert!(!a.is_empty());
    assert_eq!(a, b);
    assert_eq!(health_a, health_b);
}

#[test]
fn test_event_ticks_match_the_frame() {
    let mut state = GameState::from_scenario(&Scenario::opening(), AiProfile::default(), 4).unwrap();
    state.enable_autopilot(AiProfile::default());
    for _ in 0..500 {
        let log = state.update(16.0);
        assert!(log.iter().all(|e| e.tick == state.tick()));
    }
}

#[test]
fn test_unknown_scenario_falls_back() {
    let scenario = load_scenario_or_default("no_such_layout");
    assert_eq!(scenario.name, "opening");
}

#[test]
fn test_defeat_and_victory() {
    let mut scenario = Scenario::opening();
    let mut state = GameState::from_scenario(&scenario, AiProfile::default(), 1).unwrap();
    assert_eq!(state.outcome(), Outcome::Ongoing);

    // Take the enemy warrior by force
    let enemy = state.field.roster.ids_on_side(Side::Enemy)[0];
    state.field.roster.get_mut(enemy).unwrap().set_side(Side::Player);
    assert_eq!(state.outcome(), Outcome::Victory);

    scenario.units.iter_mut().for_each(|u| {
        if u.side == Side::Player {
            u.health = 0;
        }
    });
    let mut state = GameState::from_scenario(&scenario, AiProfile::default(), 1).unwrap();
    let player = state.field.roster.ids_on_side(Side::Player)[0];
    state.field.roster.get_mut(player).unwrap().set_side(Side::Enemy);
    assert_eq!(state.outcome(), Outcome::Defeat);
}

#[test]
fn test_reset_clears_everything() {
    let mut state = GameState::from_scenario(&Scenario::opening(), AiProfile::default(), 8).unwrap();
    for _ in 0..300 {
        state.update(16.0);
    }
    state.reset();

    assert_eq!(state.tick(), 0);
    assert!(state.field.roster.is_empty());
    assert!(state.field.troops.is_empty());
    assert_eq!(state.field.graph.route_count(), 0);
    assert_eq!(state.enemy_ai().cycles(), 0);
}

#[test]
fn test_prepared_spell_lost_with_wizard() {
    let mut state = GameState::new(6);
    let wizard = state
        .field
        .roster
        .insert(Unit::new(UnitKind::Wizard, Vec2::new(3.0, 3.0), 40, Side::Player));
    let enemy = state
        .field
        .roster
        .insert(Unit::new(UnitKind::Warrior, Vec2::new(12.0, 3.0), 100, Side::Enemy));
    state.field.connect_all();

    assert!(state.handle_input(PlayerInput::PrepareSpell {
        caster: wizard,
        spell: SpellKind::Freeze,
    }));
    state.update(16.0);
    assert_eq!(state.spells.spells.len(), 1);

    // The enemy lands a capturing troop on the wizard
    assert!(state.field.spawn_troop(enemy, wizard, 60));
    let mut captured = false;
    for _ in 0..300 {
        let log = state.update(16.0);
        captured |= log.count_matching(|e| {
            matches!(e, GameEventType::TroopArrived { target, .. } if *target == wizard)
        }) > 0;
        if captured {
            break;
        }
    }

    assert!(captured);
    assert_eq!(state.field.roster.get(wizard).unwrap().side, Side::Enemy);
    assert!(state.spells.spells.is_empty());
}

#[test]
fn test_player_and_ai_share_primitives() {
    let mut state = GameState::from_scenario(&Scenario::opening(), AiProfile::default(), 2).unwrap();
    let warrior = state.field.roster.ids_on_side(Side::Player)[0];
    let baby = state
        .field
        .roster
        .iter()
        .find(|(_, u)| u.is_kind(UnitKind::Baby))
        .map(|(id, _)| id)
        .unwrap();

    let at = state.field.roster.get(warrior).unwrap().position;
    state.handle_input(PlayerInput::Click { x: at.x, y: at.y });
    let at = state.field.roster.get(baby).unwrap().position;
    assert!(state.handle_input(PlayerInput::Click { x: at.x, y: at.y }));

    let log = state.update(16.0);
    assert_eq!(
        log.count_matching(|e| matches!(e, GameEventType::TroopSent { amount: 100, .. })),
        1
    );
}
