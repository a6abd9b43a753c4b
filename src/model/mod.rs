//! # Entity Model
//!
//! Uniform DTOs for the mixed family/ownership graph. Every raw record shape
//! normalizes into these types; every other module consumes only these.
//!
//! Design rule: NO raw JSON here, NO formatting here.
//! This module is pure data: no I/O, no state, no async.

pub mod entity;
pub mod relation;
pub mod money;
pub mod category;
pub mod detail;

pub use entity::{Entity, EntityId, EntityKind, Attributes};
pub use relation::{Relation, RelationKind, RelationList, Relations};
pub use money::{Money, MonetaryField, MonetaryFields};
pub use category::CategoryCode;
pub use detail::{
    Detail, AccountDetail, OrganisationDetail,
    BankingDetail, HoldingsDetail, Holding, InsuranceDetail,
    PropertyDetail, Mortgage, CreditDetail, LoanDetail,
    LiabilityDetail, PrivateInvestmentDetail,
};
