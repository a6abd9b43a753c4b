//! Component partitioner.
//!
//! Splits an entity set into family units: maximal groups connected by
//! relation edges in either direction. Each unit is an independent layout
//! input with its own root.
//!
//! Units come out in the order their earliest member appears in the
//! input; members within a unit are in breadth-first discovery order, so
//! the first member is the input-earliest one and the default root.

use std::collections::VecDeque;

use serde::Serialize;

use crate::index::RelationIndex;
use crate::model::{Entity, EntityId};

/// One connected component of the relation graph. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyUnit {
    members: Vec<EntityId>,
}

impl FamilyUnit {
    /// Default root: the first-discovered member.
    pub fn root(&self) -> &EntityId {
        &self.members[0]
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m.as_str() == id)
    }
}

/// Partition `entities` into family units.
pub fn partition(entities: &[Entity]) -> Vec<FamilyUnit> {
    partition_index(&RelationIndex::build(entities))
}

/// Partition using an already-built index.
pub fn partition_index(index: &RelationIndex) -> Vec<FamilyUnit> {
    let mut visited = vec![false; index.len()];
    let mut queue = VecDeque::new();
    let mut units = Vec::new();

    for start in 0..index.len() {
        if visited[start] {
            continue;
        }
        // A repeated id is only addressable at its first position.
        let first = index.id_at(start).and_then(|id| index.position(id.as_str()));
        if first != Some(start) {
            tracing::debug!(position = start, "repeated id skipped");
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        let mut members = Vec::new();
        while let Some(pos) = queue.pop_front() {
            if let Some(id) = index.id_at(pos) {
                members.push(id.clone());
            }
            for &next in index.neighbours_at(pos) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        units.push(FamilyUnit { members });
    }

    tracing::debug!(entities = index.len(), units = units.len(), "partitioned");
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationKind;
    use pretty_assertions::assert_eq;

    fn ids(unit: &FamilyUnit) -> Vec<&str> {
        unit.members().iter().map(|m| m.as_str()).collect()
    }

    #[test]
    fn test_repeated_id_appears_once() {
        let entities = vec![
            Entity::person("A").with_relation(RelationKind::Child, "B"),
            Entity::person("B"),
            Entity::person("A"),
        ];
        let units = partition(&entities);

        assert_eq!(units.len(), 1);
        assert_eq!(ids(&units[0]), vec!["A", "B"]);
    }

    #[test]
    fn test_isolated_entities_are_singletons() {
        let entities = vec![Entity::person("A"), Entity::person("B")];
        let units = partition(&entities);

        assert_eq!(units.len(), 2);
        assert_eq!(ids(&units[0]), vec!["A"]);
        assert_eq!(ids(&units[1]), vec!["B"]);
    }

    #[test]
    fn test_unit_order_follows_first_member() {
        // C links back to A, so the unit that starts at A absorbs C
        // even though B sits between them in the input.
        let entities = vec![
            Entity::person("A"),
            Entity::person("B"),
            Entity::person("C").with_relation(RelationKind::Parent, "A"),
        ];
        let units = partition(&entities);

        assert_eq!(units.len(), 2);
        assert_eq!(ids(&units[0]), vec!["A", "C"]);
        assert_eq!(ids(&units[1]), vec!["B"]);
        assert_eq!(units[0].root().as_str(), "A");
    }

    #[test]
    fn test_breadth_first_member_order() {
        let entities = vec![
            Entity::person("root")
                .with_relation(RelationKind::Child, "c1")
                .with_relation(RelationKind::Child, "c2"),
            Entity::person("gc").with_relation(RelationKind::Parent, "c1"),
            Entity::person("c1"),
            Entity::person("c2"),
        ];
        let units = partition(&entities);

        assert_eq!(units.len(), 1);
        assert_eq!(ids(&units[0]), vec!["root", "c1", "c2", "gc"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(partition(&[]).is_empty());
    }
}
