//! Raw record → `Entity`.

use serde_json::Value;

use crate::model::*;
use crate::quality::{DataQualityIssue, IssueLog};
use super::fields::{value_text, Amount, Fields};

/// Per-record decoding context. Malformed amounts are logged against the
/// record's id and then treated as absent.
pub(crate) struct Decoder<'l> {
    id: EntityId,
    log: &'l mut IssueLog,
}

impl<'l> Decoder<'l> {
    pub fn new(id: EntityId, log: &'l mut IssueLog) -> Self {
        Self { id, log }
    }

    pub fn money(&mut self, fields: &Fields<'_>, key: &str) -> Option<Money> {
        match fields.amount(key) {
            Amount::Present(m) => Some(m),
            Amount::Absent => None,
            Amount::Malformed => {
                self.log.record(DataQualityIssue::MalformedAmount {
                    id: self.id.clone(),
                    field: key.to_owned(),
                });
                None
            }
        }
    }

    /// First key that yields an amount wins.
    pub fn money_any(&mut self, fields: &Fields<'_>, keys: &[&str]) -> Option<Money> {
        keys.iter().find_map(|key| self.money(fields, key))
    }
}

/// Decode one raw record. Returns `None` (after logging) if the record is
/// not an object or has no usable id.
pub(crate) fn decode_record(index: usize, raw: &Value, log: &mut IssueLog) -> Option<Entity> {
    let Some(fields) = Fields::of(raw) else {
        log.record(DataQualityIssue::MalformedRecord {
            index,
            reason: "record is not an object".into(),
        });
        return None;
    };
    let Some(id) = fields.text("id") else {
        log.record(DataQualityIssue::MalformedRecord {
            index,
            reason: "record has no id".into(),
        });
        return None;
    };

    let id = EntityId(id);
    let kind = EntityKind::from_raw(fields.text("nodeType").as_deref());
    let details = fields.nested("details");
    let mut decoder = Decoder::new(id.clone(), log);

    let mut entity = Entity::new(id, kind);
    entity.relations = decode_relations(&fields);

    for field in MonetaryField::ALL {
        let mut money = decoder.money(&fields, field.raw_key());
        if money.is_none() && field.may_nest_in_details() {
            if let Some(details) = &details {
                money = decoder.money(details, field.raw_key());
            }
        }
        if let Some(money) = money {
            entity.monetary.insert(field, money);
        }
    }

    entity.attributes = Attributes {
        gender: fields.text("gender"),
        date_of_birth: fields.text("dateOfBirth"),
        relationship_status: fields.text("relationshipStatus"),
        account_number: fields.text("accountNumber"),
        account_type: fields.text("accountType"),
        provider_name: fields.text("providerName"),
        product_type: details.and_then(|d| d.text("accountType")),
        ownership_percentage: details.and_then(|d| d.number("ownershipPercentage")),
    };

    match kind {
        EntityKind::Person => {}
        EntityKind::Company | EntityKind::Trust => {
            entity.detail = details
                .map(|d| super::detail::decode_organisation(&d))
                .filter(|org| !org.is_empty())
                .map(Detail::Organisation);
        }
        EntityKind::Account => {
            let category = fields
                .integer("providerCategoryId")
                .and_then(CategoryCode::from_code);
            entity.category = category;
            entity.detail = match (category, details) {
                (Some(category), Some(details)) => {
                    super::detail::decode_account(category, &details, &mut decoder)
                        .map(Detail::Account)
                }
                _ => None,
            };
        }
    }

    Some(entity)
}

/// Relation items are `{id, type}` objects; a bare id string is accepted
/// too. Items without an id are dropped.
fn decode_relations(fields: &Fields<'_>) -> Relations {
    let mut relations = Relations::default();
    for kind in RelationKind::ALL {
        for item in fields.array(kind.raw_key()).unwrap_or(&[]) {
            let relation = match Fields::of(item) {
                Some(rel) => rel.text("id").map(|id| Relation {
                    id: EntityId(id),
                    relation_type: rel.text("type"),
                }),
                None => value_text(item).map(Relation::new),
            };
            match relation {
                Some(relation) => relations.push(kind, relation),
                None => tracing::debug!(?kind, "relation without id dropped"),
            }
        }
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(raw: Value) -> (Option<Entity>, Vec<DataQualityIssue>) {
        let mut log = IssueLog::new();
        let entity = decode_record(0, &raw, &mut log);
        (entity, log.into_vec())
    }

    #[test]
    fn test_wealth_person_record() {
        let (entity, issues) = decode(json!({
            "id": "Alice",
            "nodeType": "PERSON",
            "gender": "female",
            "dateOfBirth": "1970-04-02",
            "relationshipStatus": "Married",
            "netWorth": {"amount": 2500000, "currency": "GBP"},
            "advisorAUM": {"amount": 900000, "currency": "GBP"},
            "balance": null,
            "parents": [],
            "children": [{"id": "Alice ISA", "type": "blood"}],
            "siblings": [],
            "spouses": [{"id": "Bob", "type": "married"}],
            "somethingNew": {"ignored": true}
        }));
        let entity = entity.unwrap();

        assert!(issues.is_empty());
        assert_eq!(entity.kind, EntityKind::Person);
        assert_eq!(entity.category, None);
        assert_eq!(entity.money(MonetaryField::NetWorth), Some(&Money::new(2_500_000.0, "GBP")));
        assert_eq!(entity.money(MonetaryField::Balance), None);
        assert_eq!(entity.relations.children[0], Relation::typed("Alice ISA", "blood"));
        assert_eq!(entity.relations.spouses[0].id.as_str(), "Bob");
        assert_eq!(entity.attributes.date_of_birth.as_deref(), Some("1970-04-02"));
    }

    #[test]
    fn test_legacy_family_record() {
        let (entity, _) = decode(json!({
            "id": "x1",
            "gender": "male",
            "netWorth": 1200,
            "parents": [{"id": "x0", "type": "blood"}],
            "children": [],
            "siblings": [],
            "spouses": []
        }));
        let entity = entity.unwrap();

        assert_eq!(entity.kind, EntityKind::Account);
        assert_eq!(entity.money(MonetaryField::NetWorth), Some(&Money::bare(1200.0)));
        assert_eq!(entity.relations.parents.len(), 1);
    }

    #[test]
    fn test_account_with_category_and_nested_money() {
        let (entity, _) = decode(json!({
            "id": "Home",
            "nodeType": "ACCOUNT",
            "providerCategoryId": 4,
            "balance": {"amount": 650000, "currency": "GBP"},
            "details": {
                "homeValue": {"amount": 650000, "currency": "GBP"},
                "fullAddress": "1 High Street",
                "ownershipPercentage": 50,
                "accountType": "Rental Property"
            }
        }));
        let entity = entity.unwrap();

        assert_eq!(entity.category, Some(CategoryCode::Property));
        assert_eq!(entity.money(MonetaryField::HomeValue), Some(&Money::new(650_000.0, "GBP")));
        assert_eq!(entity.attributes.ownership_percentage, Some(50.0));
        assert_eq!(entity.attributes.product_type.as_deref(), Some("Rental Property"));
        assert!(matches!(
            entity.detail,
            Some(Detail::Account(AccountDetail::Property(ref p))) if p.full_address.as_deref() == Some("1 High Street")
        ));
    }

    #[test]
    fn test_malformed_amount_logged_and_dropped() {
        let (entity, issues) = decode(json!({
            "id": "A",
            "nodeType": "ACCOUNT",
            "balance": {"amount": "unknown", "currency": "GBP"}
        }));

        assert_eq!(entity.unwrap().money(MonetaryField::Balance), None);
        assert_eq!(issues, vec![DataQualityIssue::MalformedAmount {
            id: "A".into(),
            field: "balance".into(),
        }]);
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let (entity, issues) = decode(json!({"nodeType": "PERSON"}));
        assert!(entity.is_none());
        assert!(matches!(issues[0], DataQualityIssue::MalformedRecord { index: 0, .. }));

        let (entity, _) = decode(json!("just a string"));
        assert!(entity.is_none());
    }

    #[test]
    fn test_out_of_range_category_drops_detail() {
        let (entity, _) = decode(json!({
            "id": "weird",
            "nodeType": "ACCOUNT",
            "providerCategoryId": 42,
            "details": {"interestRate": 3}
        }));
        let entity = entity.unwrap();
        assert_eq!(entity.category, None);
        assert_eq!(entity.detail, None);
    }

    #[test]
    fn test_relation_items_tolerated() {
        let (entity, _) = decode(json!({
            "id": "A",
            "parents": ["P", {"type": "blood"}, {"id": 7}],
            "children": null
        }));
        let entity = entity.unwrap();
        let parents: Vec<&str> = entity.relations.parents.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(parents, vec!["P", "7"]);
        assert!(entity.relations.children.is_empty());
    }
}
