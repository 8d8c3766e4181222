//! Arena-owned unit table with stable generational handles
//!
//! Units are never referenced by pointer. Troops, spells, selections and the
//! path graph all hold `UnitId`s; a handle whose slot has been emptied or
//! reused resolves to `None`.

use crate::core::types::{Side, UnitId};
use crate::units::unit::Unit;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// All units in a simulation
#[derive(Debug, Clone, Default)]
pub struct Roster {
    slots: Vec<Slot>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, reusing the first free slot
    pub fn insert(&mut self, unit: Unit) -> UnitId {
        if let Some(index) = self.slots.iter().position(|slot| slot.unit.is_none()) {
            let slot = &mut self.slots[index];
            slot.generation += 1;
            slot.unit = Some(unit);
            return UnitId::new(index as u32, slot.generation);
        }

        self.slots.push(Slot {
            generation: 0,
            unit: Some(unit),
        });
        UnitId::new((self.slots.len() - 1) as u32, 0)
    }

    fn slot(&self, id: UnitId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.slot(id).and_then(|slot| slot.unit.as_ref())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.unit.as_mut())
    }

    /// Borrow two distinct units mutably at once
    pub fn pair_mut(&mut self, a: UnitId, b: UnitId) -> Option<(&mut Unit, &mut Unit)> {
        if a.index == b.index || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (low, high) = (ia.min(ib), ia.max(ib));
        let (head, tail) = self.slots.split_at_mut(high);
        let low_unit = head[low].unit.as_mut()?;
        let high_unit = tail[0].unit.as_mut()?;

        if ia < ib {
            Some((low_unit, high_unit))
        } else {
            Some((high_unit, low_unit))
        }
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a unit; its handle goes dead
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        slot.unit.take()
    }

    /// Swap a unit for a new one in the same slot
    ///
    /// The old handle goes dead and the replacement gets a fresh one, so
    /// anything still aimed at the old unit resolves to nothing.
    pub fn replace(&mut self, id: UnitId, unit: Unit) -> Option<UnitId> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.unit.is_some())?;
        slot.generation += 1;
        slot.unit = Some(unit);
        Some(UnitId::new(id.index, slot.generation))
    }

    /// Live units in slot order
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Unit)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.unit
                .as_ref()
                .map(|unit| (UnitId::new(index as u32, slot.generation), unit))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (UnitId, &mut Unit)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.unit
                .as_mut()
                .map(|unit| (UnitId::new(index as u32, generation), unit))
        })
    }

    pub fn ids(&self) -> Vec<UnitId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Handles of every unit on `side`, in slot order
    pub fn ids_on_side(&self, side: Side) -> Vec<UnitId> {
        self.iter()
            .filter(|(_, unit)| unit.side == side)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn count_on_side(&self, side: Side) -> usize {
        self.iter().filter(|(_, unit)| unit.side == side).count()
    }

    /// First unit (in slot order) whose body contains `point`
    pub fn unit_at(&self, point: crate::core::types::Vec2) -> Option<UnitId> {
        self.iter()
            .find(|(_, unit)| unit.contains(point))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every unit; all outstanding handles go dead
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.unit.take().is_some() {
                slot.generation += 1;
            }
        }
    }
}
