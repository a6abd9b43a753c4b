//! Relation graph index.
//!
//! Symmetrizes the four relation lists into one undirected adjacency list
//! per entity. Built once per entity set in O(entities + references);
//! traversal never rescans the entity list.
//!
//! References to ids outside the set are kept aside as dangling edges and
//! contribute nothing to adjacency.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::{Entity, EntityId, RelationKind};

/// A relation whose target is not in the entity set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEdge {
    pub from: EntityId,
    pub to: EntityId,
    pub kind: RelationKind,
}

/// Undirected adjacency over entity positions.
///
/// Positions are indexes into the entity slice the index was built from.
/// If that slice repeats an id, only the first occurrence is addressable by
/// id; later ones get no edges.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    ids: Vec<EntityId>,
    positions: HashMap<EntityId, usize>,
    adjacency: Vec<SmallVec<[usize; 4]>>,
    dangling: Vec<DanglingEdge>,
    edge_count: usize,
}

impl RelationIndex {
    pub fn build(entities: &[Entity]) -> Self {
        let mut positions: HashMap<EntityId, usize> = HashMap::with_capacity(entities.len());
        for (pos, entity) in entities.iter().enumerate() {
            positions.entry(entity.id.clone()).or_insert(pos);
        }

        let mut adjacency: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); entities.len()];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut dangling = Vec::new();

        for (pos, entity) in entities.iter().enumerate() {
            if positions.get(&entity.id) != Some(&pos) {
                continue;
            }
            for (kind, relation) in entity.relations.iter() {
                let Some(&other) = positions.get(&relation.id) else {
                    dangling.push(DanglingEdge {
                        from: entity.id.clone(),
                        to: relation.id.clone(),
                        kind,
                    });
                    continue;
                };
                if other == pos {
                    continue;
                }
                let key = (pos.min(other), pos.max(other));
                if seen.insert(key) {
                    adjacency[pos].push(other);
                    adjacency[other].push(pos);
                }
            }
        }

        let edge_count = seen.len();
        tracing::debug!(
            entities = entities.len(),
            edges = edge_count,
            dangling = dangling.len(),
            "relation index built"
        );

        Self {
            ids: entities.iter().map(|e| e.id.clone()).collect(),
            positions,
            adjacency,
            dangling,
            edge_count,
        }
    }

    /// Number of indexed positions (entities).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn id_at(&self, pos: usize) -> Option<&EntityId> {
        self.ids.get(pos)
    }

    pub fn neighbours_at(&self, pos: usize) -> &[usize] {
        self.adjacency.get(pos).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Ids one edge away from `id`, in discovery order.
    pub fn neighbours(&self, id: &str) -> Vec<&EntityId> {
        match self.position(id) {
            Some(pos) => self.neighbours_at(pos).iter().map(|&n| &self.ids[n]).collect(),
            None => Vec::new(),
        }
    }

    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(a), Some(b)) => self.neighbours_at(a).contains(&b),
            _ => false,
        }
    }

    pub fn dangling(&self) -> &[DanglingEdge] {
        &self.dangling
    }
}
