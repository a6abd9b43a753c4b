//! Node cards: the compact tile drawn for each positioned node.

use serde::Serialize;

use crate::model::*;
use super::Formatter;

/// Visual family of an account tile, derived from its product label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Plain,
    Investment,
    Property,
    Crypto,
    Bank,
    Credit,
    Loan,
    Insurance,
}

impl CardStyle {
    /// First matching keyword wins; matching is case-insensitive.
    pub fn from_product(product: Option<&str>) -> Self {
        let Some(product) = product else { return CardStyle::Plain };
        let p = product.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| p.contains(w));

        if has(&["isa", "sipp", "gia"]) {
            CardStyle::Investment
        } else if has(&["property", "rental"]) {
            CardStyle::Property
        } else if has(&["crypto"]) {
            CardStyle::Crypto
        } else if has(&["savings", "checking"]) {
            CardStyle::Bank
        } else if has(&["credit"]) {
            CardStyle::Credit
        } else if has(&["mortgage", "loan"]) {
            CardStyle::Loan
        } else if has(&["insurance"]) {
            CardStyle::Insurance
        } else {
            CardStyle::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCard {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Balance, else net worth, else the placeholder.
    pub headline: String,
    pub provider: Option<String>,
    pub masked_account: Option<String>,
    pub style: CardStyle,
}

impl NodeCard {
    pub fn build(entity: &Entity, fmt: &Formatter) -> Self {
        let attrs = &entity.attributes;
        let headline = entity
            .money(MonetaryField::Balance)
            .or_else(|| entity.money(MonetaryField::NetWorth));
        let is_account = entity.is_account();
        let product = attrs.product_type.as_deref().or(attrs.account_type.as_deref());

        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            headline: fmt.money(headline),
            provider: attrs.provider_name.clone().filter(|_| is_account),
            masked_account: attrs
                .account_number
                .as_deref()
                .filter(|_| is_account)
                .map(|n| fmt.masked(n)),
            style: CardStyle::from_product(product),
        }
    }
}
