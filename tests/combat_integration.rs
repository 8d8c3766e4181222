//! Combat integration tests: arrivals, tower fire, upgrades and spells

use jelly_skirmish::core::config::{SPELL_COOLDOWN, TOWER_DAMAGE};
use jelly_skirmish::core::types::{Side, UnitId, Vec2};
use jelly_skirmish::spells::{cast_spell, SpellKind};
use jelly_skirmish::transit::{resolve_arrival, ArrivalOutcome, Troop};
use jelly_skirmish::units::{Unit, UnitKind};
use jelly_skirmish::world::{Battlefield, GameEventType, GameState};

fn linked(state: &mut GameState, units: Vec<Unit>) -> Vec<UnitId> {
    let ids = units
        .into_iter()
        .map(|u| state.field.roster.insert(u))
        .collect();
    state.field.connect_all();
    ids
}

#[test]
fn test_warrior_upgrade_spends_everything() {
    let mut warrior = Unit::new(UnitKind::Warrior, Vec2::ZERO, 5, Side::Player);
    let max_before = warrior.max_health;

    assert!(warrior.can_upgrade());
    assert!(warrior.perform_upgrade());
    assert_eq!(warrior.health, 0);
    assert_eq!(warrior.level, 2);
    assert_eq!(warrior.max_health, max_before + 10);
}

#[test]
fn test_convert_takes_the_tower() {
    let mut wizard = Unit::new(UnitKind::Wizard, Vec2::ZERO, 100, Side::Enemy);
    assert!(wizard.perform_upgrade());
    assert!(wizard.perform_upgrade());
    assert_eq!(wizard.level, 3);
    wizard.health = 80;

    let mut tower = Unit::new(UnitKind::Tower, Vec2::new(4.0, 0.0), 20, Side::Player);
    assert!(cast_spell(&mut wizard, SpellKind::Convert, &mut tower));

    assert_eq!(tower.side, Side::Enemy);
    assert_eq!(wizard.health, 30);
    assert_eq!(
        wizard.spell_book().unwrap().cooldown(SpellKind::Convert),
        SPELL_COOLDOWN
    );
}

#[test]
fn test_troop_against_tower_deals_eighteen() {
    let mut tower = Unit::new(UnitKind::Tower, Vec2::ZERO, 30, Side::Enemy);
    assert_eq!(tower.defense, 2.0);

    let outcome = resolve_arrival(&mut tower, Side::Player, 20);
    assert_eq!(outcome, ArrivalOutcome::Damaged { damage: 18 });
    assert_eq!(tower.health, 12);
}

#[test]
fn test_thin_sender_keeps_its_health() {
    let mut field = Battlefield::new();
    let from = field
        .roster
        .insert(Unit::new(UnitKind::Warrior, Vec2::ZERO, 12, Side::Enemy));
    let to = field
        .roster
        .insert(Unit::new(UnitKind::Warrior, Vec2::new(5.0, 0.0), 50, Side::Player));
    field.connect_all();

    assert!(!field.send_troops(from, to, 5));
    assert!(field.troops.is_empty());
    assert_eq!(field.roster.get(from).unwrap().health, 12);
    assert!(field.events.is_empty());
}

#[test]
fn test_capture_leaves_non_negative_health() {
    for (health, amount) in [(0, 1), (3, 10), (9, 10), (10, 11), (1, 200)] {
        let mut baby = Unit::new(UnitKind::Baby, Vec2::ZERO, health, Side::Neutral);
        resolve_arrival(&mut baby, Side::Enemy, amount);
        assert!(baby.health >= 0, "health {health} hit by {amount}");
    }
}

#[test]
fn test_capture_over_a_full_run() {
    let mut state = GameState::new(11);
    let ids = linked(
        &mut state,
        vec![
            Unit::new(UnitKind::Warrior, Vec2::new(1.0, 1.0), 100, Side::Player),
            Unit::new(UnitKind::Baby, Vec2::new(6.0, 1.0), 10, Side::Neutral),
        ],
    );

    assert!(state.field.spawn_troop(ids[0], ids[1], 30));
    let mut captured = None;
    for _ in 0..300 {
        let log = state.update(16.0);
        for event in log.iter() {
            if let GameEventType::TroopArrived { outcome, .. } = &event.event_type {
                captured = Some(*outcome);
            }
        }
        if captured.is_some() {
            break;
        }
    }

    // 30 - 1 defense = 29 damage against 10 health
    assert_eq!(
        captured,
        Some(ArrivalOutcome::Captured {
            damage: 29,
            new_health: 19
        })
    );
    let baby = state.field.roster.get(ids[1]).unwrap();
    assert_eq!(baby.side, Side::Player);
}

#[test]
fn test_tower_shoots_troop_down_in_transit() {
    let mut state = GameState::new(5);
    let ids = linked(
        &mut state,
        vec![
            Unit::new(UnitKind::Tower, Vec2::new(5.0, 4.0), 20, Side::Enemy),
            Unit::new(UnitKind::Warrior, Vec2::new(1.0, 1.0), 50, Side::Player),
            Unit::new(UnitKind::Warrior, Vec2::new(9.0, 7.0), 50, Side::Enemy),
        ],
    );

    // A slow troop loitering beside the tower
    let waypoints: Vec<Vec2> = (0..20)
        .map(|i| Vec2::new(3.6 + i as f32 * 0.01, 4.0))
        .collect();
    state
        .field
        .troops
        .push(Troop::new(ids[1], ids[2], Side::Player, TOWER_DAMAGE, waypoints, 10));

    let mut fired = 0;
    let mut destroyed = 0;
    for _ in 0..60 {
        let log = state.update(16.0);
        fired += log.count_matching(|e| matches!(e, GameEventType::TowerFired { .. }));
        destroyed += log.count_matching(|e| matches!(e, GameEventType::TroopDestroyed { .. }));
    }

    assert_eq!(fired, 1);
    assert_eq!(destroyed, 1);
    assert!(state.field.troops.is_empty());
    // The dead troop never landed
    assert_eq!(state.field.roster.get(ids[2]).unwrap().side, Side::Enemy);
}

#[test]
fn test_reinforcement_overflows_then_bleeds() {
    let mut state = GameState::new(2);
    let ids = linked(
        &mut state,
        vec![
            Unit::new(UnitKind::Warrior, Vec2::new(1.0, 1.0), 100, Side::Player),
            Unit::new(UnitKind::Tower, Vec2::new(4.0, 1.0), 20, Side::Player),
        ],
    );

    let outcome = resolve_arrival(state.field.roster.get_mut(ids[1]).unwrap(), Side::Player, 15);
    assert_eq!(outcome, ArrivalOutcome::Reinforced { amount: 15 });
    assert_eq!(state.field.roster.get(ids[1]).unwrap().health, 35);

    for _ in 0..70 {
        state.update(16.0);
    }
    assert!(state.field.roster.get(ids[1]).unwrap().health < 35);
}

#[test]
fn test_sickness_drains_and_freeze_cures() {
    let mut wizard = Unit::new(UnitKind::Wizard, Vec2::ZERO, 100, Side::Player);
    assert!(wizard.perform_upgrade());
    wizard.health = 100;

    let mut warrior = Unit::new(UnitKind::Warrior, Vec2::new(3.0, 0.0), 40, Side::Enemy);
    assert!(cast_spell(&mut wizard, SpellKind::Sickness, &mut warrior));
    assert!(warrior.is_sick);
    assert_eq!(warrior.max_health, 0);

    for _ in 0..3 {
        warrior.update(1.0);
    }
    assert_eq!(warrior.health, 37);

    assert!(cast_spell(&mut wizard, SpellKind::Freeze, &mut warrior));
    assert_eq!(warrior.side, Side::Neutral);
    assert!(!warrior.is_sick);
    assert_eq!(warrior.max_health, 100);
}
