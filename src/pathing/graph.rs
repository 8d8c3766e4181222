//! Unit connectivity and the cached route for every connected ordered pair

use ahash::AHashMap;

use crate::core::types::{UnitId, Vec2};
use crate::pathing::steering::{simulate_route, Obstacle};
use crate::units::Roster;

/// Undirected adjacency plus a directed route cache
///
/// The cache is rebuilt in full by `calculate_paths`; nothing patches it
/// incrementally. Callers must recompute after any change to the roster's
/// composition or positions before trusting a lookup.
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    adjacency: AHashMap<UnitId, Vec<UnitId>>,
    paths: AHashMap<(UnitId, UnitId), Vec<Vec2>>,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `a` and `b` both ways. Self-loops and repeats are ignored.
    pub fn add_edge(&mut self, a: UnitId, b: UnitId) {
        if a == b {
            return;
        }
        let forward = self.adjacency.entry(a).or_default();
        if !forward.contains(&b) {
            forward.push(b);
        }
        let backward = self.adjacency.entry(b).or_default();
        if !backward.contains(&a) {
            backward.push(a);
        }
    }

    /// Connect every pair in `ids`
    pub fn connect_all(&mut self, ids: &[UnitId]) {
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                self.add_edge(a, b);
            }
        }
    }

    pub fn connections(&self, id: UnitId) -> &[UnitId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_connected(&self, a: UnitId, b: UnitId) -> bool {
        self.connections(a).contains(&b)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Rebuild every cached route from current unit positions
    ///
    /// Endpoints no longer in the roster are skipped. All other units act as
    /// obstacles for a given pair.
    pub fn calculate_paths(&mut self, roster: &Roster) {
        self.paths.clear();

        let bodies: Vec<(UnitId, Obstacle)> = roster
            .iter()
            .map(|(id, unit)| (id, Obstacle::new(unit.position, unit.size)))
            .collect();

        for (&from, neighbors) in &self.adjacency {
            let Some(start) = roster.get(from).map(|u| u.position) else {
                continue;
            };
            for &to in neighbors {
                let Some(goal) = roster.get(to).map(|u| u.position) else {
                    continue;
                };

                let obstacles: Vec<Obstacle> = bodies
                    .iter()
                    .filter(|(id, _)| *id != from && *id != to)
                    .map(|(_, obstacle)| *obstacle)
                    .collect();

                self.paths
                    .insert((from, to), simulate_route(start, goal, &obstacles));
            }
        }

        tracing::debug!(
            edges = self.edge_count(),
            routes = self.paths.len(),
            "path cache rebuilt"
        );
    }

    /// Cached route from `from` to `to`; `None` means unreachable
    pub fn get_path(&self, from: UnitId, to: UnitId) -> Option<&[Vec2]> {
        self.paths
            .get(&(from, to))
            .map(Vec::as_slice)
            .filter(|route| !route.is_empty())
    }

    pub fn has_path(&self, from: UnitId, to: UnitId) -> bool {
        self.get_path(from, to).is_some()
    }

    pub fn route_count(&self) -> usize {
        self.paths.len()
    }

    /// Move all of `old`'s edges onto `new` (used when a unit is replaced)
    ///
    /// Cached routes touching `old` are dropped; recompute afterwards.
    pub fn relink(&mut self, old: UnitId, new: UnitId) {
        let Some(neighbors) = self.adjacency.remove(&old) else {
            return;
        };
        for neighbor in neighbors {
            if let Some(list) = self.adjacency.get_mut(&neighbor) {
                list.retain(|&id| id != old);
            }
            self.add_edge(new, neighbor);
        }
        self.paths.retain(|&(a, b), _| a != old && b != old);
    }

    /// Forget `id` entirely
    pub fn remove_unit(&mut self, id: UnitId) {
        if let Some(neighbors) = self.adjacency.remove(&id) {
            for neighbor in neighbors {
                if let Some(list) = self.adjacency.get_mut(&neighbor) {
                    list.retain(|&other| other != id);
                }
            }
        }
        self.paths.retain(|&(a, b), _| a != id && b != id);
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Side;
    use crate::units::{Unit, UnitKind};

    fn roster_with(positions: &[(f32, f32)]) -> (Roster, Vec<UnitId>) {
        let mut roster = Roster::new();
        let ids: Vec<UnitId> = positions
            .iter()
            .map(|&(x, y)| {
                roster.insert(Unit::new(
                    UnitKind::Warrior,
                    Vec2::new(x, y),
                    20,
                    Side::Neutral,
                ))
            })
            .collect();
        (roster, ids)
    }

    #[test]
    fn test_add_edge_is_undirected_and_deduplicated() {
        let mut graph = PathGraph::new();
        let a = UnitId::new(0, 0);
        let b = UnitId::new(1, 0);

        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(a, a);

        assert_eq!(graph.connections(a), &[b]);
        assert_eq!(graph.connections(b), &[a]);
        assert!(graph.is_connected(b, a));
        assert!(!graph.is_connected(a, a));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_paths_exist_both_directions() {
        let (roster, ids) = roster_with(&[(0.0, 0.0), (4.0, 0.0)]);
        let mut graph = PathGraph::new();
        graph.add_edge(ids[0], ids[1]);
        assert!(graph.get_path(ids[0], ids[1]).is_none());

        graph.calculate_paths(&roster);
        let there = graph.get_path(ids[0], ids[1]).unwrap();
        let back = graph.get_path(ids[1], ids[0]).unwrap();
        assert_eq!(there[0], Vec2::new(0.0, 0.0));
        assert_eq!(*there.last().unwrap(), Vec2::new(4.0, 0.0));
        assert_eq!(*back.last().unwrap(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_unconnected_pair_has_no_path() {
        let (roster, ids) = roster_with(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let mut graph = PathGraph::new();
        graph.add_edge(ids[0], ids[1]);
        graph.calculate_paths(&roster);
        assert!(!graph.has_path(ids[0], ids[2]));
        assert!(!graph.has_path(ids[0], ids[0]));
    }

    #[test]
    fn test_relink_moves_edges_to_new_handle() {
        let (mut roster, ids) = roster_with(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let mut graph = PathGraph::new();
        graph.connect_all(&ids);
        graph.calculate_paths(&roster);

        let tower = Unit::new(UnitKind::Tower, Vec2::new(0.0, 0.0), 5, Side::Neutral);
        let new_id = roster.replace(ids[0], tower).unwrap();
        graph.relink(ids[0], new_id);
        assert!(graph.get_path(ids[0], ids[1]).is_none());

        graph.calculate_paths(&roster);
        assert!(graph.has_path(new_id, ids[1]));
        assert!(graph.has_path(ids[2], new_id));
        assert!(graph.is_connected(ids[1], new_id));
        assert!(!graph.is_connected(ids[1], ids[0]));
        assert!(!graph.connections(ids[1]).contains(&ids[0]));
    }

    #[test]
    fn test_removed_endpoint_skipped_on_recompute() {
        let (mut roster, ids) = roster_with(&[(0.0, 0.0), (4.0, 0.0)]);
        let mut graph = PathGraph::new();
        graph.add_edge(ids[0], ids[1]);
        roster.remove(ids[1]);

        graph.calculate_paths(&roster);
        assert_eq!(graph.route_count(), 0);

        graph.remove_unit(ids[1]);
        assert!(graph.connections(ids[0]).is_empty());
    }
}
