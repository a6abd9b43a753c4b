//! Category-specific detail payloads.
//!
//! One variant per schema, each carrying only its own fields. Decoding
//! lives in `source::detail`; rendering in `present::account`.

use serde::{Deserialize, Serialize};

use super::{CategoryCode, Money};

/// Detail payload attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Detail {
    /// Companies and trusts.
    Organisation(OrganisationDetail),
    Account(AccountDetail),
}

/// Identity detail for companies and trusts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganisationDetail {
    pub trust_type: Option<String>,
    pub established: Option<String>,
    pub trustee: Option<String>,
    pub beneficiaries: Vec<String>,
    pub jurisdiction: Option<String>,
}

impl OrganisationDetail {
    pub fn is_empty(&self) -> bool {
        self.trust_type.is_none()
            && self.established.is_none()
            && self.trustee.is_none()
            && self.beneficiaries.is_empty()
            && self.jurisdiction.is_none()
    }
}

/// Account detail, keyed by category. There is no variant for the
/// reserved code: accounts in it carry no detail at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AccountDetail {
    Banking(BankingDetail),
    Investments(HoldingsDetail),
    Insurance(InsuranceDetail),
    Property(PropertyDetail),
    Credit(CreditDetail),
    Loan(LoanDetail),
    Crypto(HoldingsDetail),
    Nft(HoldingsDetail),
    OtherAsset,
    OtherLiability(LiabilityDetail),
    PrivateInvestment(PrivateInvestmentDetail),
}

impl AccountDetail {
    pub fn category(&self) -> CategoryCode {
        match self {
            AccountDetail::Banking(_) => CategoryCode::Banking,
            AccountDetail::Investments(_) => CategoryCode::Investments,
            AccountDetail::Insurance(_) => CategoryCode::Insurance,
            AccountDetail::Property(_) => CategoryCode::Property,
            AccountDetail::Credit(_) => CategoryCode::Credit,
            AccountDetail::Loan(_) => CategoryCode::Loans,
            AccountDetail::Crypto(_) => CategoryCode::Crypto,
            AccountDetail::Nft(_) => CategoryCode::Nfts,
            AccountDetail::OtherAsset => CategoryCode::OtherAssets,
            AccountDetail::OtherLiability(_) => CategoryCode::OtherLiabilities,
            AccountDetail::PrivateInvestment(_) => CategoryCode::PrivateInvestments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankingDetail {
    pub interest_rate: Option<f64>,
}

/// Shared by investments, crypto and NFTs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsDetail {
    /// Uninvested cash (floor value for NFT collections).
    pub cash: Option<Money>,
    /// In source order.
    pub holdings: Vec<Holding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub description: Option<String>,
    pub holding_type: Option<String>,
    pub value: Option<Money>,
    pub allocation: Option<f64>,
    pub quantity: Option<f64>,
    pub price: Option<Money>,
    pub symbol: Option<String>,
    pub isin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceDetail {
    pub face_amount: Option<Money>,
    pub policy_term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub full_address: Option<String>,
    pub property_type: Option<String>,
    pub purchase_price: Option<Money>,
    pub equity: Option<Money>,
    pub ltv: Option<f64>,
    pub occupancy_rate: Option<f64>,
    pub annual_rental_income: Option<Money>,
    pub annual_expenses: Option<Money>,
    pub mortgage: Option<Mortgage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mortgage {
    pub principal_balance: Option<Money>,
    pub original_loan_amount: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditDetail {
    pub interest_rate: Option<f64>,
    pub available_credit: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanDetail {
    pub original_loan_amount: Option<Money>,
    pub interest_rate: Option<f64>,
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiabilityDetail {
    pub interest_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivateInvestmentDetail {
    pub displayed_name: Option<String>,
    pub business_name: Option<String>,
    pub seis_amount: Option<Money>,
    pub eis_amount: Option<Money>,
    pub business_sector: Option<String>,
    pub quantity: Option<f64>,
}
