//! Per-category interpreters for account detail.

use crate::model::*;
use super::{FieldBuilder, Formatter, Group, ListItem, Section};

/// Which instrument identifier a holdings list shows.
#[derive(Debug, Clone, Copy)]
enum Identifier {
    Isin,
    Symbol,
}

/// The category-specific section of an account, if it has one.
///
/// `None` when the account has no category, the category is reserved, or
/// the detail payload is missing.
pub fn category_section(entity: &Entity, fmt: &Formatter) -> Option<Section> {
    let Some(Detail::Account(detail)) = &entity.detail else {
        return None;
    };
    if entity.category != Some(detail.category()) {
        tracing::debug!(id = %entity.id, "detail payload does not match category");
        return None;
    }

    let mut f = FieldBuilder::new(fmt);
    let mut groups = Vec::new();
    let balance = entity.money(MonetaryField::Balance);

    let title = match detail {
        AccountDetail::Banking(d) => {
            f.percent("Interest Rate", d.interest_rate);
            "Bank Account Details"
        }
        AccountDetail::Investments(d) => {
            f.money("Cash Balance", d.cash.as_ref());
            groups.push(holdings_group(&d.holdings, Identifier::Isin, fmt));
            "Investment Details"
        }
        AccountDetail::Insurance(d) => {
            f.money_always("Cash Value", entity.money(MonetaryField::CashValue))
                .money_always("Face Amount", d.face_amount.as_ref())
                .text("Policy Term", d.policy_term.as_deref());
            "Insurance Details"
        }
        AccountDetail::Property(d) => {
            f.text("Address", d.full_address.as_deref())
                .text("Type", d.property_type.as_deref())
                .money_always("Value", entity.money(MonetaryField::HomeValue))
                .money_always("Purchase Price", d.purchase_price.as_ref())
                .money_always("Equity", d.equity.as_ref())
                .percent_always("LTV", d.ltv)
                .percent("Occupancy Rate", d.occupancy_rate)
                .money("Annual Rental Income", d.annual_rental_income.as_ref())
                .money_always("Annual Expenses", d.annual_expenses.as_ref());
            if let Some(m) = &d.mortgage {
                let fields = FieldBuilder::new(fmt)
                    .money_always("Principal Balance", m.principal_balance.as_ref())
                    .money_always("Original Loan", m.original_loan_amount.as_ref())
                    .finish();
                groups.push(Group { title: "Mortgage Details".into(), fields, items: Vec::new() });
            }
            "Property Details"
        }
        AccountDetail::Credit(d) => {
            f.money_always("Credit Limit", balance)
                .money("Available Credit", d.available_credit.as_ref())
                .percent_always("Interest Rate", d.interest_rate);
            "Credit Account Details"
        }
        AccountDetail::Loan(d) => {
            let original = d
                .original_loan_amount
                .as_ref()
                .or_else(|| entity.money(MonetaryField::OriginalLoanAmount));
            f.money_always("Principal Balance", entity.money(MonetaryField::PrincipalBalance))
                .money_always("Original Amount", original)
                .percent_always("Interest Rate", d.interest_rate)
                .text("Term", d.term.as_deref());
            "Loan Details"
        }
        AccountDetail::Crypto(d) => {
            f.money("Cash Balance", d.cash.as_ref());
            groups.push(holdings_group(&d.holdings, Identifier::Symbol, fmt));
            "Crypto Details"
        }
        AccountDetail::Nft(d) => {
            f.money("Floor Value", d.cash.as_ref());
            groups.push(holdings_group(&d.holdings, Identifier::Symbol, fmt));
            "NFT Collection"
        }
        AccountDetail::OtherAsset => {
            f.money_always("Value", balance);
            "Asset Details"
        }
        AccountDetail::OtherLiability(d) => {
            f.money_always("Principal Balance", balance)
                .money_always("Original Amount", entity.money(MonetaryField::OriginalLoanAmount))
                .percent_always("Interest Rate", d.interest_rate);
            "Liability Details"
        }
        AccountDetail::PrivateInvestment(d) => {
            let seis = d.seis_amount.as_ref().filter(|m| !m.is_zero());
            let eis = d.eis_amount.as_ref().filter(|m| !m.is_zero());
            f.text("Fund Name", d.displayed_name.as_deref())
                .text("Manager", d.business_name.as_deref())
                .money("SEIS Investment", seis)
                .money("EIS Investment", eis)
                .text("Sector", d.business_sector.as_deref())
                .number("Quantity", d.quantity);
            "Private Investment Details"
        }
    };

    Some(Section { title: title.to_owned(), fields: f.finish(), groups })
}

/// Holdings in source order; never sorted by value.
fn holdings_group(holdings: &[Holding], identifier: Identifier, fmt: &Formatter) -> Group {
    let items = holdings
        .iter()
        .map(|h| {
            let (label, id) = match identifier {
                Identifier::Isin => ("ISIN", h.isin.as_deref()),
                Identifier::Symbol => ("Symbol", h.symbol.as_deref()),
            };
            ListItem {
                heading: h.description.clone().unwrap_or_default(),
                summary: format!("{} ({})", fmt.money(h.value.as_ref()), fmt.percent(h.allocation)),
                fields: FieldBuilder::new(fmt)
                    .number("Quantity", h.quantity)
                    .money("Price", h.price.as_ref())
                    .text(label, id)
                    .finish(),
            }
        })
        .collect();

    Group { title: "Holdings".into(), fields: Vec::new(), items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::present::{present, Field};

    fn account(code: i64, detail: AccountDetail) -> Entity {
        Entity::account("acct", CategoryCode::from_code(code))
            .with_detail(Detail::Account(detail))
    }

    fn gbp(amount: f64) -> Option<Money> {
        Some(Money::new(amount, "GBP"))
    }

    #[test]
    fn test_crypto_section_lists_holdings() {
        let entity = account(7, AccountDetail::Crypto(HoldingsDetail {
            cash: gbp(250.0),
            holdings: vec![
                Holding {
                    description: Some("Bitcoin".into()),
                    value: gbp(30_000.0),
                    allocation: Some(75.0),
                    quantity: Some(0.75),
                    price: gbp(40_000.0),
                    symbol: Some("BTC".into()),
                    ..Default::default()
                },
                Holding {
                    description: Some("Mystery coin".into()),
                    value: gbp(10_000.0),
                    allocation: Some(25.0),
                    ..Default::default()
                },
            ],
        }));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.title, "Crypto Details");
        assert_eq!(section.value("Cash Balance"), Some("£250"));
        let holdings = section.group("Holdings").unwrap();
        assert_eq!(holdings.items[0], ListItem {
            heading: "Bitcoin".into(),
            summary: "£30,000 (75.0%)".into(),
            fields: vec![
                Field::new("Quantity", "0.75"),
                Field::new("Price", "£40,000"),
                Field::new("Symbol", "BTC"),
            ],
        });
        assert!(holdings.items[1].fields.is_empty());
        assert_eq!(holdings.items[1].heading, "Mystery coin");
    }

    #[test]
    fn test_investment_holdings_show_isin() {
        let entity = account(2, AccountDetail::Investments(HoldingsDetail {
            cash: None,
            holdings: vec![Holding {
                description: Some("Global Index".into()),
                isin: Some("GB00B4PQW151".into()),
                symbol: Some("IGNORED".into()),
                ..Default::default()
            }],
        }));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.title, "Investment Details");
        assert!(section.fields.is_empty());
        let item = &section.group("Holdings").unwrap().items[0];
        assert_eq!(item.value("ISIN"), Some("GB00B4PQW151"));
        assert_eq!(item.value("Symbol"), None);
        assert_eq!(item.summary, "- (0%)");
    }

    #[test]
    fn test_property_section_placeholders_and_mortgage() {
        let entity = account(4, AccountDetail::Property(PropertyDetail {
            full_address: Some("1 High Street".into()),
            ltv: Some(62.5),
            mortgage: Some(Mortgage {
                principal_balance: gbp(200_000.0),
                original_loan_amount: None,
            }),
            ..Default::default()
        }))
        .with_money(MonetaryField::HomeValue, Money::new(450_000.0, "GBP"));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.fields, vec![
            Field::new("Address", "1 High Street"),
            Field::new("Value", "£450,000"),
            Field::new("Purchase Price", "-"),
            Field::new("Equity", "-"),
            Field::new("LTV", "62.5%"),
            Field::new("Annual Expenses", "-"),
        ]);
        let mortgage = section.group("Mortgage Details").unwrap();
        assert_eq!(mortgage.value("Principal Balance"), Some("£200,000"));
        assert_eq!(mortgage.value("Original Loan"), Some("-"));
    }

    #[test]
    fn test_credit_uses_balance_as_limit() {
        let entity = account(5, AccountDetail::Credit(CreditDetail::default()))
            .with_money(MonetaryField::Balance, Money::new(5000.0, "GBP"));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.fields, vec![
            Field::new("Credit Limit", "£5,000"),
            Field::new("Interest Rate", "0%"),
        ]);
    }

    #[test]
    fn test_loan_original_amount_falls_back_to_monetary_field() {
        let entity = account(6, AccountDetail::Loan(LoanDetail {
            interest_rate: Some(4.5),
            ..Default::default()
        }))
        .with_money(MonetaryField::PrincipalBalance, Money::new(90_000.0, "GBP"))
        .with_money(MonetaryField::OriginalLoanAmount, Money::new(120_000.0, "GBP"));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.title, "Loan Details");
        assert_eq!(section.value("Principal Balance"), Some("£90,000"));
        assert_eq!(section.value("Original Amount"), Some("£120,000"));
        assert_eq!(section.value("Interest Rate"), Some("4.5%"));
    }

    #[test]
    fn test_private_investment_skips_zero_schemes() {
        let entity = account(12, AccountDetail::PrivateInvestment(PrivateInvestmentDetail {
            displayed_name: Some("Seed Fund".into()),
            seis_amount: gbp(0.0),
            eis_amount: gbp(15_000.0),
            quantity: Some(1500.0),
            ..Default::default()
        }));

        let section = category_section(&entity, &Formatter::default()).unwrap();

        assert_eq!(section.fields, vec![
            Field::new("Fund Name", "Seed Fund"),
            Field::new("EIS Investment", "£15,000"),
            Field::new("Quantity", "1,500"),
        ]);
    }

    #[test]
    fn test_category_without_detail_is_identity_only() {
        let entity = Entity::account("acct", CategoryCode::from_code(1));
        let p = present(&entity, &Formatter::default());

        assert_eq!(p.sections.len(), 1);
        assert_eq!(p.sections[0].title, "Account Information");
    }

    #[test]
    fn test_reserved_category_is_identity_only() {
        let entity = Entity::account("acct", CategoryCode::from_code(9))
            .with_money(MonetaryField::Balance, Money::new(10.0, "GBP"));
        let p = present(&entity, &Formatter::default());

        assert_eq!(p.sections.len(), 1);
        assert_eq!(p.sections[0].title, "Account Information");
    }

    #[test]
    fn test_mismatched_payload_is_ignored() {
        let entity = account(1, AccountDetail::OtherAsset);
        assert!(category_section(&entity, &Formatter::default()).is_none());
    }
}
