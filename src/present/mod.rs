//! # Detail Presenter
//!
//! Turns one entity into ordered, labeled sections ready for display.
//!
//! Dispatch is two-level: by kind first (person / company / trust /
//! account), then for accounts by category code. Every category has its
//! own interpreter in `account`; a category without one yields the
//! identity section only. Nothing here can fail.
//!
//! ```text
//! Entity ──► identity section ──► category section (accounts) ──► relation panels
//! ```

pub mod format;
pub mod account;
pub mod card;
pub mod text;

use serde::Serialize;

use crate::model::*;
pub use format::{Formatter, PLACEHOLDER, ZERO_PERCENT};
pub use card::{CardStyle, NodeCard};

// ============================================================================
// Presentation tree
// ============================================================================

/// Everything the side panel shows for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    /// The entity id, shown as the panel title.
    pub title: String,
    pub kind: EntityKind,
    pub sections: Vec<Section>,
    pub relations: Vec<RelationPanel>,
}

impl Presentation {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub fields: Vec<Field>,
    /// Titled sub-blocks such as "Holdings" or "Mortgage Details".
    pub groups: Vec<Group>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), fields: Vec::new(), groups: Vec::new() }
    }

    /// Value of the first field with this label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.label == label).map(|f| f.value.as_str())
    }

    pub fn group(&self, title: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub title: String,
    pub fields: Vec<Field>,
    pub items: Vec<ListItem>,
}

impl Group {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.label == label).map(|f| f.value.as_str())
    }
}

/// One entry of a list group, e.g. a holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub heading: String,
    /// Right-hand summary, e.g. `£1,000 (12.5%)`.
    pub summary: String,
    pub fields: Vec<Field>,
}

impl ListItem {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.label == label).map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A list of related entity ids under a heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationPanel {
    pub title: String,
    pub kind: RelationKind,
    pub items: Vec<Relation>,
}

// ============================================================================
// Field builder
// ============================================================================

/// Appends fields under the presence rules: `*_always` renders a
/// placeholder when the value is absent, the plain forms skip it.
pub(crate) struct FieldBuilder<'f> {
    fmt: &'f Formatter,
    out: Vec<Field>,
}

impl<'f> FieldBuilder<'f> {
    pub fn new(fmt: &'f Formatter) -> Self {
        Self { fmt, out: Vec::new() }
    }

    pub fn text(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.out.push(Field::new(label, value));
        }
        self
    }

    pub fn text_always(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        self.out.push(Field::new(label, value.unwrap_or_default()));
        self
    }

    pub fn money(&mut self, label: &str, value: Option<&Money>) -> &mut Self {
        if value.is_some() {
            self.money_always(label, value);
        }
        self
    }

    pub fn money_always(&mut self, label: &str, value: Option<&Money>) -> &mut Self {
        self.out.push(Field::new(label, self.fmt.money(value)));
        self
    }

    pub fn percent(&mut self, label: &str, value: Option<f64>) -> &mut Self {
        if value.is_some() {
            self.percent_always(label, value);
        }
        self
    }

    pub fn percent_always(&mut self, label: &str, value: Option<f64>) -> &mut Self {
        self.out.push(Field::new(label, self.fmt.percent(value)));
        self
    }

    pub fn date_always(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        self.out.push(Field::new(label, self.fmt.date(value)));
        self
    }

    pub fn date(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        if value.is_some() {
            self.date_always(label, value);
        }
        self
    }

    pub fn number(&mut self, label: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.out.push(Field::new(label, self.fmt.number(value)));
        }
        self
    }

    pub fn finish(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.out)
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Present one entity.
pub fn present(entity: &Entity, fmt: &Formatter) -> Presentation {
    let mut sections = vec![identity_section(entity, fmt)];

    if entity.kind == EntityKind::Account {
        if let Some(section) = account::category_section(entity, fmt) {
            sections.push(section);
        }
    }

    Presentation {
        title: entity.id.to_string(),
        kind: entity.kind,
        sections,
        relations: relation_panels(entity),
    }
}

fn identity_section(entity: &Entity, fmt: &Formatter) -> Section {
    let attrs = &entity.attributes;
    let mut fields = FieldBuilder::new(fmt);

    let title = match entity.kind {
        EntityKind::Person => {
            fields
                .money_always("Net Worth", entity.money(MonetaryField::NetWorth))
                .date_always("Date of Birth", attrs.date_of_birth.as_deref())
                .text_always("Relationship Status", attrs.relationship_status.as_deref())
                .money_always("Advisor AUM", entity.money(MonetaryField::AdvisorAum));
            "Personal Information"
        }
        EntityKind::Company | EntityKind::Trust => {
            fields.text("Type", Some(entity.kind.label()));
            if let Some(Detail::Organisation(org)) = &entity.detail {
                let beneficiaries = (!org.beneficiaries.is_empty()).then(|| org.beneficiaries.join(", "));
                fields
                    .text("Trust Type", org.trust_type.as_deref())
                    .date("Established", org.established.as_deref())
                    .text("Trustee", org.trustee.as_deref())
                    .text("Beneficiaries", beneficiaries.as_deref())
                    .text("Jurisdiction", org.jurisdiction.as_deref());
            }
            if entity.kind == EntityKind::Company { "Company Information" } else { "Trust Information" }
        }
        EntityKind::Account => {
            let masked = attrs.account_number.as_deref().map(|n| fmt.masked(n));
            let ownership = attrs.ownership_percentage.filter(|p| *p != 0.0);
            fields
                .money("Balance", entity.money(MonetaryField::Balance))
                .text("Account Number", masked.as_deref())
                .text("Provider", attrs.provider_name.as_deref())
                .text("Account Type", attrs.account_type.as_deref())
                .percent("Ownership", ownership);
            "Account Information"
        }
    };

    Section { title: title.to_owned(), fields: fields.finish(), groups: Vec::new() }
}

/// Persons show all four lists (children as ownership structures);
/// companies show their owners; trusts and accounts show none.
fn relation_panels(entity: &Entity) -> Vec<RelationPanel> {
    let panels: &[(&str, RelationKind)] = match entity.kind {
        EntityKind::Person => &[
            ("Parents", RelationKind::Parent),
            ("Ownership Structures", RelationKind::Child),
            ("Siblings", RelationKind::Sibling),
            ("Spouses", RelationKind::Spouse),
        ],
        EntityKind::Company => &[("Owner", RelationKind::Parent)],
        EntityKind::Trust | EntityKind::Account => &[],
    };

    panels
        .iter()
        .map(|(title, kind)| RelationPanel {
            title: (*title).to_owned(),
            kind: *kind,
            items: entity.relations.get(*kind).to_vec(),
        })
        .collect()
}
