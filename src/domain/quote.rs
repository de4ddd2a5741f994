use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};

use super::money::percent_of;

/// One billable row of a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub details: Vec<String>,
    pub unit_price: BigDecimal,
    pub quantity: i64,
    /// Percentage, `20` means 20 %.
    pub tax_rate_percent: BigDecimal,
    pub discount: BigDecimal,
}

impl LineItem {
    pub fn gross(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }

    /// Taxable base: gross minus the pre-tax discount.
    pub fn subtotal(&self) -> BigDecimal {
        self.gross() - &self.discount
    }

    pub fn tax(&self) -> BigDecimal {
        percent_of(&self.subtotal(), &self.tax_rate_percent)
    }

    pub fn total(&self) -> BigDecimal {
        self.subtotal() + self.tax()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDetails {
    pub name: String,
    pub iban: String,
    pub bic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTerms {
    pub payment: String,
    pub late_penalties: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub total_ht: BigDecimal,
    pub total_tax: BigDecimal,
    pub total_ttc: BigDecimal,
}

impl Totals {
    /// Sum the items at full precision.
    pub fn from_items(items: &[LineItem]) -> Self {
        let (total_ht, total_tax) = items.iter().fold(
            (BigDecimal::zero(), BigDecimal::zero()),
            |(ht, tax), item| (ht + item.subtotal(), tax + item.tax()),
        );
        let total_ttc = &total_ht + &total_tax;
        Self {
            total_ht,
            total_tax,
            total_ttc,
        }
    }
}

/// Caller-supplied totals. Each field independently replaces its computed
/// counterpart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsOverride {
    pub total_ht: Option<BigDecimal>,
    pub total_tax: Option<BigDecimal>,
    pub total_ttc: Option<BigDecimal>,
}

impl TotalsOverride {
    pub fn is_empty(&self) -> bool {
        self.total_ht.is_none() && self.total_tax.is_none() && self.total_ttc.is_none()
    }

    pub fn apply(&self, computed: &Totals) -> Totals {
        Totals {
            total_ht: self.total_ht.clone().unwrap_or_else(|| computed.total_ht.clone()),
            total_tax: self
                .total_tax
                .clone()
                .unwrap_or_else(|| computed.total_tax.clone()),
            total_ttc: self
                .total_ttc
                .clone()
                .unwrap_or_else(|| computed.total_ttc.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxBreakdownLine {
    pub rate: BigDecimal,
    pub base: BigDecimal,
    pub tax: BigDecimal,
}

/// A validated, fully defaulted quote. Built once per request by the
/// normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub start_date: Option<String>,
    pub supplier: Party,
    pub client: Party,
    pub bank: BankDetails,
    pub terms: PaymentTerms,
    pub items: Vec<LineItem>,
    pub computed_totals: Totals,
    pub totals: Totals,
}

impl Quote {
    pub fn is_overridden(&self) -> bool {
        self.totals != self.computed_totals
    }

    /// Item bases and taxes grouped by rate, lowest rate first.
    pub fn tax_breakdown(&self) -> Vec<TaxBreakdownLine> {
        let mut by_rate: BTreeMap<BigDecimal, (BigDecimal, BigDecimal)> = BTreeMap::new();
        for item in &self.items {
            let entry = by_rate
                .entry(item.tax_rate_percent.clone())
                .or_insert_with(|| (BigDecimal::zero(), BigDecimal::zero()));
            entry.0 += item.subtotal();
            entry.1 += item.tax();
        }
        by_rate
            .into_iter()
            .map(|(rate, (base, tax))| TaxBreakdownLine { rate, base, tax })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn item(price: &str, quantity: i64, rate: &str, discount: &str) -> LineItem {
        LineItem {
            description: "Consulting".to_string(),
            details: vec![],
            unit_price: dec(price),
            quantity,
            tax_rate_percent: dec(rate),
            discount: dec(discount),
        }
    }

    #[test]
    fn line_math_applies_discount_before_tax() {
        let line = item("100", 3, "20", "50");
        assert_eq!(line.gross(), dec("300"));
        assert_eq!(line.subtotal(), dec("250"));
        assert_eq!(line.tax(), dec("50"));
        assert_eq!(line.total(), dec("300"));
    }

    #[test]
    fn one_cent_line_keeps_full_precision() {
        let line = item("0.01", 1, "20", "0");
        assert_eq!(line.total(), dec("0.012"));
    }

    #[test]
    fn totals_sum_per_item_rates() {
        let items = vec![item("100", 1, "20", "0"), item("200", 1, "5.5", "0")];
        let totals = Totals::from_items(&items);
        assert_eq!(totals.total_ht, dec("300"));
        assert_eq!(totals.total_tax, dec("31"));
        assert_eq!(totals.total_ttc, dec("331"));
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let computed = Totals::from_items(&[item("10", 2, "20", "0")]);
        let overrides = TotalsOverride {
            total_tax: Some(dec("1")),
            ..Default::default()
        };
        let totals = overrides.apply(&computed);
        assert_eq!(totals.total_ht, dec("20"));
        assert_eq!(totals.total_tax, dec("1"));
        assert_eq!(totals.total_ttc, dec("24"));
    }

    #[test]
    fn breakdown_groups_equal_rates() {
        let items = vec![
            item("100", 1, "20", "0"),
            item("50", 2, "20.0", "0"),
            item("10", 1, "0", "0"),
        ];
        let computed = Totals::from_items(&items);
        let quote = Quote {
            number: "D-1".to_string(),
            issue_date: String::new(),
            expiry_date: String::new(),
            start_date: None,
            supplier: Party::default(),
            client: Party::default(),
            bank: BankDetails {
                name: String::new(),
                iban: String::new(),
                bic: String::new(),
            },
            terms: PaymentTerms {
                payment: String::new(),
                late_penalties: String::new(),
            },
            items,
            totals: computed.clone(),
            computed_totals: computed,
        };

        let breakdown = quote.tax_breakdown();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].rate, dec("0"));
        assert_eq!(breakdown[1].base, dec("200"));
        assert_eq!(breakdown[1].tax, dec("40"));
        assert!(!quote.is_overridden());
    }
}
