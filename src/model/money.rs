//! Monetary amounts and the per-entity monetary field map.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// An amount with an optional ISO 4217 currency code.
///
/// `currency == None` comes from the legacy bare-number shape; the
/// formatter substitutes its default currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Option<String>,
}

impl Money {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self { amount, currency: Some(currency.into()) }
    }

    /// Legacy shape: a bare number with no currency.
    pub fn bare(amount: f64) -> Self {
        Self { amount, currency: None }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }
}

/// Semantic names of the monetary fields an entity may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonetaryField {
    NetWorth,
    AdvisorAum,
    Balance,
    HomeValue,
    CashValue,
    PrincipalBalance,
    OriginalLoanAmount,
}

impl MonetaryField {
    pub const ALL: [MonetaryField; 7] = [
        MonetaryField::NetWorth,
        MonetaryField::AdvisorAum,
        MonetaryField::Balance,
        MonetaryField::HomeValue,
        MonetaryField::CashValue,
        MonetaryField::PrincipalBalance,
        MonetaryField::OriginalLoanAmount,
    ];

    /// Key in raw records.
    pub fn raw_key(&self) -> &'static str {
        match self {
            MonetaryField::NetWorth => "netWorth",
            MonetaryField::AdvisorAum => "advisorAUM",
            MonetaryField::Balance => "balance",
            MonetaryField::HomeValue => "homeValue",
            MonetaryField::CashValue => "cashValue",
            MonetaryField::PrincipalBalance => "principalBalance",
            MonetaryField::OriginalLoanAmount => "originalLoanAmount",
        }
    }

    /// Whether the field may also be found inside the `details` payload.
    pub fn may_nest_in_details(&self) -> bool {
        !matches!(
            self,
            MonetaryField::NetWorth | MonetaryField::AdvisorAum | MonetaryField::Balance
        )
    }
}

/// Absent means "not applicable", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetaryFields(HashMap<MonetaryField, Money>);

impl MonetaryFields {
    pub fn get(&self, field: MonetaryField) -> Option<&Money> {
        self.0.get(&field)
    }

    pub fn insert(&mut self, field: MonetaryField, money: Money) {
        self.0.insert(field, money);
    }

    pub fn contains(&self, field: MonetaryField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
