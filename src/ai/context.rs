//! Read-only view of the battlefield from one side's perspective

use crate::ai::strategy::{side_power, SideAnalysis};
use crate::core::types::{Side, UnitId};
use crate::pathing::PathGraph;
use crate::units::{Roster, Unit};

/// What a commander may look at while deciding
pub struct DecisionContext<'a> {
    pub roster: &'a Roster,
    pub graph: &'a PathGraph,
    pub side: Side,
}

impl<'a> DecisionContext<'a> {
    pub fn new(roster: &'a Roster, graph: &'a PathGraph, side: Side) -> Self {
        Self {
            roster,
            graph,
            side,
        }
    }

    /// The faction this side fights; neutral commanders have none
    pub fn opponent(&self) -> Option<Side> {
        self.side.opponent()
    }

    fn units_on(&self, side: Side) -> Vec<(UnitId, &'a Unit)> {
        self.roster
            .iter()
            .filter(|(_, unit)| unit.side == side)
            .collect()
    }

    pub fn own_units(&self) -> Vec<(UnitId, &'a Unit)> {
        self.units_on(self.side)
    }

    pub fn opponent_units(&self) -> Vec<(UnitId, &'a Unit)> {
        match self.opponent() {
            Some(side) => self.units_on(side),
            None => Vec::new(),
        }
    }

    pub fn neutral_units(&self) -> Vec<(UnitId, &'a Unit)> {
        self.units_on(Side::Neutral)
    }

    pub fn unit(&self, id: UnitId) -> Option<&'a Unit> {
        self.roster.get(id)
    }

    /// A non-empty cached route exists
    pub fn can_reach(&self, from: UnitId, to: UnitId) -> bool {
        self.graph.has_path(from, to)
    }

    pub fn analyze(&self) -> SideAnalysis {
        let own = self.own_units();
        let opponent = self.opponent_units();
        SideAnalysis {
            own_count: own.len(),
            opponent_count: opponent.len(),
            neutral_count: self.neutral_units().len(),
            own_power: side_power(own.iter().map(|(_, u)| *u)),
            opponent_power: side_power(opponent.iter().map(|(_, u)| *u)),
        }
    }
}
