//! Immutable snapshot of one loaded data source.

use hashbrown::{HashMap, HashSet};
use serde_json::Value;

use crate::index::RelationIndex;
use crate::model::{Entity, EntityId};
use crate::partition::{partition_index, FamilyUnit};
use crate::quality::{DataQualityIssue, IssueLog};
use crate::{Error, Result};
use super::record::decode_record;

/// Entities of one source plus everything derived from them: the relation
/// index, the family-unit partition and the data-quality issues.
///
/// Built once per load and never mutated. Switching sources means
/// replacing the whole snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    name: String,
    entities: Vec<Entity>,
    index: RelationIndex,
    units: Vec<FamilyUnit>,
    unit_of: HashMap<EntityId, usize>,
    issues: Vec<DataQualityIssue>,
}

impl Snapshot {
    /// Build from already-normalized entities.
    pub fn from_entities(name: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self::assemble(name.into(), entities, IssueLog::new())
    }

    /// Build from a JSON document holding a list of raw records.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(name, &value)
    }

    pub fn from_json_value(name: impl Into<String>, value: &Value) -> Result<Self> {
        let Some(records) = value.as_array() else {
            return Err(Error::Parse("data source must be a list of records".into()));
        };
        let mut log = IssueLog::new();
        let entities = records
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| decode_record(i, raw, &mut log))
            .collect();
        Ok(Self::assemble(name.into(), entities, log))
    }

    fn assemble(name: String, entities: Vec<Entity>, mut log: IssueLog) -> Self {
        let mut seen: HashSet<EntityId> = HashSet::with_capacity(entities.len());
        let mut unique = Vec::with_capacity(entities.len());
        for (index, entity) in entities.into_iter().enumerate() {
            if !seen.insert(entity.id.clone()) {
                log.record(DataQualityIssue::DuplicateId { id: entity.id, index });
                continue;
            }
            unique.push(entity);
        }

        let index = RelationIndex::build(&unique);
        log.extend(index.dangling().iter().map(|edge| DataQualityIssue::DanglingRelation {
            from: edge.from.clone(),
            to: edge.to.clone(),
            kind: edge.kind,
        }));

        let units = partition_index(&index);
        let unit_of = units
            .iter()
            .enumerate()
            .flat_map(|(i, unit)| unit.members().iter().map(move |id| (id.clone(), i)))
            .collect();

        tracing::info!(
            source = %name,
            entities = unique.len(),
            units = units.len(),
            issues = log.len(),
            "source loaded"
        );

        Self {
            name,
            entities: unique,
            index,
            units,
            unit_of,
            issues: log.into_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities in source order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.index.position(id).map(|pos| &self.entities[pos])
    }

    /// Like `entity`, but a missing id is an error.
    pub fn require(&self, id: &str) -> Result<&Entity> {
        self.entity(id).ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.position(id).is_some()
    }

    pub fn index(&self) -> &RelationIndex {
        &self.index
    }

    pub fn units(&self) -> &[FamilyUnit] {
        &self.units
    }

    /// Which family unit `id` belongs to.
    pub fn unit_index_of(&self, id: &str) -> Option<usize> {
        self.unit_of.get(id).copied()
    }

    /// Entities of one unit, in discovery order.
    pub fn unit_entities(&self, unit: usize) -> Vec<&Entity> {
        self.units
            .get(unit)
            .map(|u| u.members().iter().filter_map(|id| self.entity(id.as_str())).collect())
            .unwrap_or_default()
    }

    pub fn issues(&self) -> &[DataQualityIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationKind;

    #[test]
    fn test_duplicate_ids_keep_first() {
        let snap = Snapshot::from_entities("dupes", vec![
            Entity::person("A"),
            Entity::account("A", None),
            Entity::person("B"),
        ]);

        assert_eq!(snap.len(), 2);
        assert_eq!(snap.entity("A").unwrap().kind, crate::model::EntityKind::Person);
        assert_eq!(snap.issues(), &[DataQualityIssue::DuplicateId { id: "A".into(), index: 1 }]);
    }

    #[test]
    fn test_dangling_becomes_issue() {
        let snap = Snapshot::from_entities("dangling", vec![
            Entity::person("A").with_relation(RelationKind::Spouse, "nobody"),
        ]);

        assert_eq!(snap.units().len(), 1);
        assert!(matches!(snap.issues()[0], DataQualityIssue::DanglingRelation { .. }));
    }

    #[test]
    fn test_non_list_document_rejected() {
        let err = Snapshot::from_json_str("bad", r#"{"id": "A"}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = Snapshot::from_json_str("bad", "not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unit_lookup() {
        let snap = Snapshot::from_entities("units", vec![
            Entity::person("A").with_relation(RelationKind::Child, "B"),
            Entity::person("B"),
            Entity::person("C"),
        ]);

        assert_eq!(snap.unit_index_of("B"), Some(0));
        assert_eq!(snap.unit_index_of("C"), Some(1));
        assert_eq!(snap.unit_index_of("Z"), None);
        let ids: Vec<&str> = snap.unit_entities(0).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
