//! Relations: the four typed edge lists carried by every entity.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::EntityId;

/// The four edge kinds that count for connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Parent,
    Child,
    Sibling,
    Spouse,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Parent,
        RelationKind::Child,
        RelationKind::Sibling,
        RelationKind::Spouse,
    ];

    /// Key of the list in raw records.
    pub fn raw_key(&self) -> &'static str {
        match self {
            RelationKind::Parent => "parents",
            RelationKind::Child => "children",
            RelationKind::Sibling => "siblings",
            RelationKind::Spouse => "spouses",
        }
    }
}

/// One reference to another entity, e.g. `{ id: "B", type: "blood" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: EntityId,
    /// Free-form qualifier from the source (blood, adopted, married, ...).
    pub relation_type: Option<String>,
}

impl Relation {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self { id: id.into(), relation_type: None }
    }

    pub fn typed(id: impl Into<EntityId>, relation_type: impl Into<String>) -> Self {
        Self { id: id.into(), relation_type: Some(relation_type.into()) }
    }
}

/// Most entities carry one or two references per kind.
pub type RelationList = SmallVec<[Relation; 2]>;

/// Ordered relation lists, one per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relations {
    pub parents: RelationList,
    pub children: RelationList,
    pub siblings: RelationList,
    pub spouses: RelationList,
}

impl Relations {
    pub fn get(&self, kind: RelationKind) -> &[Relation] {
        match kind {
            RelationKind::Parent => &self.parents,
            RelationKind::Child => &self.children,
            RelationKind::Sibling => &self.siblings,
            RelationKind::Spouse => &self.spouses,
        }
    }

    pub fn push(&mut self, kind: RelationKind, relation: Relation) {
        let list = match kind {
            RelationKind::Parent => &mut self.parents,
            RelationKind::Child => &mut self.children,
            RelationKind::Sibling => &mut self.siblings,
            RelationKind::Spouse => &mut self.spouses,
        };
        list.push(relation);
    }

    /// Every reference, tagged with its kind, in kind order then list order.
    pub fn iter(&self) -> impl Iterator<Item = (RelationKind, &Relation)> {
        RelationKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |r| (kind, r)))
    }

    pub fn len(&self) -> usize {
        self.parents.len() + self.children.len() + self.siblings.len() + self.spouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
