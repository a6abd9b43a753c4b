//! Raw `details` payload → typed detail variant.

use crate::model::*;
use super::fields::Fields;
use super::record::Decoder;

pub(crate) fn decode_organisation(details: &Fields<'_>) -> OrganisationDetail {
    OrganisationDetail {
        trust_type: details.text("trustType"),
        established: details.text("established"),
        trustee: details.text("trustee"),
        beneficiaries: details
            .array("beneficiaries")
            .unwrap_or(&[])
            .iter()
            .filter_map(super::fields::value_text)
            .collect(),
        jurisdiction: details.text("jurisdiction"),
    }
}

/// `None` for the reserved category, and for holdings categories whose
/// payload has no holdings list.
pub(crate) fn decode_account(
    category: CategoryCode,
    details: &Fields<'_>,
    dec: &mut Decoder<'_>,
) -> Option<AccountDetail> {
    let detail = match category {
        CategoryCode::Banking => AccountDetail::Banking(BankingDetail {
            interest_rate: details.number("interestRate"),
        }),
        CategoryCode::Investments => AccountDetail::Investments(holdings(details, dec)?),
        CategoryCode::Insurance => AccountDetail::Insurance(InsuranceDetail {
            face_amount: dec.money(details, "faceAmount"),
            policy_term: details.text("policyTerm"),
        }),
        CategoryCode::Property => AccountDetail::Property(PropertyDetail {
            full_address: details.text("fullAddress"),
            property_type: details.text("type").or_else(|| details.text("propertyType")),
            purchase_price: dec.money(details, "purchasePrice"),
            equity: dec.money(details, "equity"),
            ltv: details.number("ltv"),
            occupancy_rate: details
                .number("occupancyRate")
                .or_else(|| details.number("annualOccupancyRate")),
            annual_rental_income: dec.money(details, "annualRentalIncome"),
            annual_expenses: dec.money(details, "annualExpenses"),
            mortgage: details.nested("mortgageDetails").map(|m| Mortgage {
                principal_balance: dec.money(&m, "principalBalance"),
                original_loan_amount: dec.money(&m, "originalLoanAmount"),
            }),
        }),
        CategoryCode::Credit => AccountDetail::Credit(CreditDetail {
            interest_rate: details.number("interestRate").or_else(|| details.number("apr")),
            available_credit: dec.money(details, "availableCredit"),
        }),
        CategoryCode::Loans => AccountDetail::Loan(LoanDetail {
            original_loan_amount: details
                .nested("mortgageDetails")
                .and_then(|m| dec.money(&m, "originalLoanAmount")),
            interest_rate: details.number("interestRate"),
            term: details.text("term"),
        }),
        CategoryCode::Crypto => AccountDetail::Crypto(holdings(details, dec)?),
        CategoryCode::Nfts => AccountDetail::Nft(holdings(details, dec)?),
        CategoryCode::Reserved => return None,
        CategoryCode::OtherAssets => AccountDetail::OtherAsset,
        CategoryCode::OtherLiabilities => AccountDetail::OtherLiability(LiabilityDetail {
            interest_rate: details.number("interestRate"),
        }),
        CategoryCode::PrivateInvestments => AccountDetail::PrivateInvestment(PrivateInvestmentDetail {
            displayed_name: details.text("displayedName"),
            business_name: details.text("businessName"),
            seis_amount: dec.money_any(details, &["SEISInvestmentAmount", "seisAmount"]),
            eis_amount: dec.money_any(details, &["EISInvestmentAmount", "eisAmount"]),
            business_sector: details.text("businessSector"),
            quantity: details.number("quantity"),
        }),
    };
    Some(detail)
}

fn holdings(details: &Fields<'_>, dec: &mut Decoder<'_>) -> Option<HoldingsDetail> {
    let items = details.array("holdings")?;
    let holdings = items
        .iter()
        .filter_map(Fields::of)
        .map(|h| Holding {
            description: h.text("description"),
            holding_type: h.text("holdingType"),
            value: dec.money(&h, "value"),
            allocation: h.number("allocation"),
            quantity: h.number("quantity"),
            price: dec.money(&h, "price"),
            symbol: h.text("symbol"),
            isin: h.text("isin"),
        })
        .collect();
    Some(HoldingsDetail {
        cash: dec.money(details, "cash"),
        holdings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::IssueLog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(category: i64, details: serde_json::Value) -> Option<AccountDetail> {
        let mut log = IssueLog::new();
        let mut dec = Decoder::new("acct".into(), &mut log);
        let fields = Fields::of(&details).unwrap();
        decode_account(CategoryCode::from_code(category).unwrap(), &fields, &mut dec)
    }

    #[test]
    fn test_crypto_holdings_keep_source_order() {
        let detail = decode(7, json!({
            "cash": {"amount": 100, "currency": "GBP"},
            "holdings": [
                {"description": "Ether", "value": {"amount": 10, "currency": "GBP"}, "quantity": 2, "symbol": "ETH"},
                {"description": "Bitcoin", "value": {"amount": 900, "currency": "GBP"}, "quantity": 0.5, "symbol": "BTC"},
                "not a holding"
            ]
        }));
        let Some(AccountDetail::Crypto(h)) = detail else { panic!("expected crypto detail") };

        assert_eq!(h.cash, Some(Money::new(100.0, "GBP")));
        let names: Vec<_> = h.holdings.iter().map(|h| h.description.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["Ether", "Bitcoin"]);
        assert_eq!(h.holdings[1].quantity, Some(0.5));
    }

    #[test]
    fn test_holdings_category_without_list_has_no_detail() {
        assert_eq!(decode(2, json!({"cash": 10})), None);
        assert_eq!(decode(8, json!({})), None);
    }

    #[test]
    fn test_reserved_category_has_no_detail() {
        assert_eq!(decode(9, json!({"interestRate": 1.0})), None);
    }

    #[test]
    fn test_private_investment_aliases() {
        let detail = decode(12, json!({
            "displayedName": "Growth Fund",
            "seisAmount": {"amount": 5000, "currency": "GBP"},
            "EISInvestmentAmount": 2000
        }));
        let Some(AccountDetail::PrivateInvestment(p)) = detail else { panic!("expected private investment") };

        assert_eq!(p.seis_amount, Some(Money::new(5000.0, "GBP")));
        assert_eq!(p.eis_amount, Some(Money::bare(2000.0)));
        assert_eq!(p.business_name, None);
    }

    #[test]
    fn test_credit_falls_back_to_apr() {
        let detail = decode(5, json!({"apr": 19.9}));
        assert_eq!(detail, Some(AccountDetail::Credit(CreditDetail {
            interest_rate: Some(19.9),
            available_credit: None,
        })));
    }
}
