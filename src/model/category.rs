//! Financial account taxonomy.

use serde::{Deserialize, Serialize};

/// Provider category code of an account (1–12).
///
/// Code 9 exists in the taxonomy but has no schema; it decodes to
/// `Reserved` so it can be told apart from an out-of-range code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryCode {
    Banking,
    Investments,
    Insurance,
    Property,
    Credit,
    Loans,
    Crypto,
    Nfts,
    Reserved,
    OtherAssets,
    OtherLiabilities,
    PrivateInvestments,
}

impl CategoryCode {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => CategoryCode::Banking,
            2 => CategoryCode::Investments,
            3 => CategoryCode::Insurance,
            4 => CategoryCode::Property,
            5 => CategoryCode::Credit,
            6 => CategoryCode::Loans,
            7 => CategoryCode::Crypto,
            8 => CategoryCode::Nfts,
            9 => CategoryCode::Reserved,
            10 => CategoryCode::OtherAssets,
            11 => CategoryCode::OtherLiabilities,
            12 => CategoryCode::PrivateInvestments,
            _ => return None,
        })
    }

    pub fn code(&self) -> u8 {
        match self {
            CategoryCode::Banking => 1,
            CategoryCode::Investments => 2,
            CategoryCode::Insurance => 3,
            CategoryCode::Property => 4,
            CategoryCode::Credit => 5,
            CategoryCode::Loans => 6,
            CategoryCode::Crypto => 7,
            CategoryCode::Nfts => 8,
            CategoryCode::Reserved => 9,
            CategoryCode::OtherAssets => 10,
            CategoryCode::OtherLiabilities => 11,
            CategoryCode::PrivateInvestments => 12,
        }
    }

    /// False only for the reserved slot.
    pub fn has_schema(&self) -> bool {
        *self != CategoryCode::Reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_covers_taxonomy() {
        for code in 1..=12 {
            let cat = CategoryCode::from_code(code).unwrap();
            assert_eq!(i64::from(cat.code()), code);
        }
    }

    #[test]
    fn test_out_of_range_and_reserved() {
        assert_eq!(CategoryCode::from_code(0), None);
        assert_eq!(CategoryCode::from_code(13), None);
        assert_eq!(CategoryCode::from_code(-4), None);
        assert!(!CategoryCode::from_code(9).unwrap().has_schema());
        assert!(CategoryCode::from_code(7).unwrap().has_schema());
    }
}
