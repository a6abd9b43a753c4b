//! Entity: a node in the family/ownership graph.

use serde::{Deserialize, Serialize};

use super::{CategoryCode, Detail, MonetaryField, MonetaryFields, Money, Relation, RelationKind, Relations};

/// Stable entity identifier, unique within one data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self { EntityId(s.to_owned()) }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self { EntityId(s) }
}

impl std::borrow::Borrow<str> for EntityId {
    fn borrow(&self) -> &str { &self.0 }
}

/// What an entity is. Selects the detail schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Company,
    Trust,
    Account,
}

impl EntityKind {
    /// Normalize a raw `nodeType` value. Unknown or missing values become
    /// `Account`, which without a category renders identity only.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("person") => EntityKind::Person,
            Some("company") => EntityKind::Company,
            Some("trust") => EntityKind::Trust,
            _ => EntityKind::Account,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Company => "Company",
            EntityKind::Trust => "Trust",
            EntityKind::Account => "Account",
        }
    }
}

/// Loose scalar attributes. Which ones are populated depends on the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub gender: Option<String>,
    /// ISO-8601 date as supplied; formatted at presentation time.
    pub date_of_birth: Option<String>,
    pub relationship_status: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub provider_name: Option<String>,
    /// Product label carried inside the detail payload (e.g. "Stocks & Shares ISA").
    pub product_type: Option<String>,
    pub ownership_percentage: Option<f64>,
}

/// A normalized entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Only ever set when `kind == Account`.
    pub category: Option<CategoryCode>,
    pub relations: Relations,
    pub monetary: MonetaryFields,
    pub attributes: Attributes,
    pub detail: Option<Detail>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
            category: None,
            relations: Relations::default(),
            monetary: MonetaryFields::default(),
            attributes: Attributes::default(),
            detail: None,
        }
    }

    pub fn person(id: impl Into<EntityId>) -> Self {
        Self::new(id, EntityKind::Person)
    }

    pub fn account(id: impl Into<EntityId>, category: Option<CategoryCode>) -> Self {
        Self::new(id, EntityKind::Account).with_category(category)
    }

    /// Categories are ignored on anything that is not an account.
    pub fn with_category(mut self, category: Option<CategoryCode>) -> Self {
        self.category = if self.kind == EntityKind::Account { category } else { None };
        self
    }

    pub fn with_relation(mut self, kind: RelationKind, target: impl Into<EntityId>) -> Self {
        self.relations.push(kind, Relation::new(target));
        self
    }

    pub fn with_money(mut self, field: MonetaryField, money: Money) -> Self {
        self.monetary.insert(field, money);
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn money(&self, field: MonetaryField) -> Option<&Money> {
        self.monetary.get(field)
    }

    pub fn is_account(&self) -> bool {
        self.kind == EntityKind::Account
    }
}
