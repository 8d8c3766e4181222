//! Path graph integration tests

use jelly_skirmish::ai::AiProfile;
use jelly_skirmish::core::config::{PATH_CAPTURE_RADIUS, PATH_STEP, PATH_WAYPOINT_SPACING};
use jelly_skirmish::core::types::{Side, UnitId, Vec2};
use jelly_skirmish::pathing::{route_length, PathGraph};
use jelly_skirmish::units::{Roster, Unit, UnitKind};
use jelly_skirmish::world::{GameState, Scenario};

fn opening() -> GameState {
    GameState::from_scenario(&Scenario::opening(), AiProfile::default(), 7)
        .expect("opening scenario is valid")
}

#[test]
fn test_opening_routes_reach_their_targets() {
    let state = opening();
    let roster = &state.field.roster;
    let ids = roster.ids();

    for &from in &ids {
        for &to in &ids {
            if from == to {
                continue;
            }
            let route = state.field.graph.get_path(from, to).expect("every pair is linked");
            let start = roster.get(from).unwrap().position;
            let goal = roster.get(to).unwrap().position;

            assert_eq!(route[0], start);
            let last = *route.last().unwrap();
            assert!(
                last.distance(goal) <= PATH_CAPTURE_RADIUS,
                "route {from} -> {to} ended {} from its goal",
                last.distance(goal)
            );
            for pair in route.windows(2) {
                assert!(pair[0].distance(pair[1]) > 0.0);
            }
        }
    }
}

#[test]
fn test_interior_waypoints_are_thinned() {
    let state = opening();
    let ids = state.field.roster.ids();
    let route = state.field.graph.get_path(ids[0], ids[6]).unwrap();

    // Skip the first step and the appended goal
    if route.len() > 3 {
        for pair in route[1..route.len() - 1].windows(2) {
            assert!(pair[0].distance(pair[1]) > PATH_WAYPOINT_SPACING);
            assert!(pair[0].distance(pair[1]) <= PATH_WAYPOINT_SPACING + PATH_STEP + 1e-4);
        }
    }
}

#[test]
fn test_recalculation_is_deterministic() {
    let mut state = opening();
    let ids = state.field.roster.ids();
    let before: Vec<Vec<Vec2>> = ids
        .iter()
        .flat_map(|&a| ids.iter().map(move |&b| (a, b)))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| state.field.graph.get_path(a, b).unwrap().to_vec())
        .collect();

    state.field.recalculate_paths();

    let after: Vec<Vec<Vec2>> = ids
        .iter()
        .flat_map(|&a| ids.iter().map(move |&b| (a, b)))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| state.field.graph.get_path(a, b).unwrap().to_vec())
        .collect();

    assert_eq!(before.len(), after.len());
    for (x, y) in before.iter().zip(&after) {
        assert_eq!(x.len(), y.len());
        assert!(x.last().unwrap().distance(*y.last().unwrap()) < 1e-5);
    }
}

#[test]
fn test_routes_bend_around_bystanders() {
    let mut roster = Roster::new();
    let a = roster.insert(Unit::new(UnitKind::Warrior, Vec2::new(1.0, 4.0), 50, Side::Player));
    let b = roster.insert(Unit::new(UnitKind::Warrior, Vec2::new(11.0, 4.0), 50, Side::Enemy));
    let bystander =
        roster.insert(Unit::new(UnitKind::Tower, Vec2::new(6.0, 4.3), 20, Side::Neutral));

    let mut graph = PathGraph::new();
    graph.connect_all(&[a, b, bystander]);
    graph.calculate_paths(&roster);

    let route = graph.get_path(a, b).unwrap();
    let straight = 10.0;
    assert!(route_length(route) > straight);

    // Nothing on the route enters the bystander's body
    let center = roster.get(bystander).unwrap().position;
    let radius = roster.get(bystander).unwrap().size;
    assert!(route.iter().all(|p| p.distance(center) > radius));
}

#[test]
fn test_evolution_keeps_every_route() {
    let mut state = opening();
    let baby = state
        .field
        .roster
        .iter()
        .find(|(_, u)| u.is_kind(UnitKind::Baby))
        .map(|(id, _)| id)
        .unwrap();
    let routes = state.field.graph.route_count();

    let warrior = state.field.evolve_unit(baby, UnitKind::Warrior).unwrap();
    assert_eq!(state.field.graph.route_count(), routes);

    let others: Vec<UnitId> = state
        .field
        .roster
        .ids()
        .into_iter()
        .filter(|&id| id != warrior)
        .collect();
    for other in others {
        assert!(state.field.graph.has_path(warrior, other));
        assert!(state.field.graph.has_path(other, warrior));
        assert!(!state.field.graph.has_path(other, baby));
    }
}
