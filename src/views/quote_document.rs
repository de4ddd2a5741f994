use serde::Serialize;

use crate::domain::money::{format_amount, format_rate};
use crate::domain::quote::{Party, Quote, Totals};

// ── Document view handed to renderers ────────────────────────────────────────
//
// Field names are the wire names of the rendering collaborator. Amounts are
// rounded to two decimals here and nowhere earlier.

#[derive(Debug, Serialize)]
pub struct QuoteDocument {
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "date_emission")]
    pub issue_date: String,
    #[serde(rename = "date_expiration")]
    pub expiry_date: String,
    #[serde(rename = "date_debut")]
    pub start_date: String,
    #[serde(rename = "fournisseur")]
    pub supplier: PartyView,
    pub client: PartyView,
    #[serde(rename = "banque")]
    pub bank: BankView,
    pub conditions: TermsView,
    pub items: Vec<LineItemView>,
    #[serde(rename = "totaux")]
    pub totals: TotalsView,
    /// Only present when caller-supplied totals replaced computed ones.
    #[serde(rename = "totaux_calcules", skip_serializing_if = "Option::is_none")]
    pub computed_totals: Option<TotalsView>,
    #[serde(rename = "ventilation_tva")]
    pub tax_breakdown: Vec<TaxLineView>,
}

#[derive(Debug, Serialize)]
pub struct PartyView {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "ville")]
    pub city: String,
    pub email: String,
    #[serde(rename = "siret")]
    pub tax_id: String,
    #[serde(rename = "telephone")]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct BankView {
    #[serde(rename = "nom")]
    pub name: String,
    pub iban: String,
    pub bic: String,
}

#[derive(Debug, Serialize)]
pub struct TermsView {
    #[serde(rename = "paiement")]
    pub payment: String,
    #[serde(rename = "penalites_retard")]
    pub late_penalties: String,
}

#[derive(Debug, Serialize)]
pub struct LineItemView {
    pub description: String,
    pub details: Vec<String>,
    #[serde(rename = "prix_unitaire")]
    pub unit_price: String,
    #[serde(rename = "quantite")]
    pub quantity: i64,
    #[serde(rename = "tva_taux")]
    pub tax_rate: String,
    #[serde(rename = "remise")]
    pub discount: String,
    pub total_ht: String,
    pub total_tva: String,
    pub total_ttc: String,
}

#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub total_ht: String,
    pub total_tva: String,
    pub total_ttc: String,
}

#[derive(Debug, Serialize)]
pub struct TaxLineView {
    #[serde(rename = "taux")]
    pub rate: String,
    pub base_ht: String,
    #[serde(rename = "montant_tva")]
    pub tax: String,
}

impl From<&Party> for PartyView {
    fn from(p: &Party) -> Self {
        Self {
            name: p.name.clone(),
            address: p.address.clone(),
            city: p.city.clone(),
            email: p.email.clone(),
            tax_id: p.tax_id.clone(),
            phone: p.phone.clone(),
        }
    }
}

impl From<&Totals> for TotalsView {
    fn from(t: &Totals) -> Self {
        Self {
            total_ht: format_amount(&t.total_ht),
            total_tva: format_amount(&t.total_tax),
            total_ttc: format_amount(&t.total_ttc),
        }
    }
}

impl From<&Quote> for QuoteDocument {
    fn from(quote: &Quote) -> Self {
        Self {
            number: quote.number.clone(),
            issue_date: quote.issue_date.clone(),
            expiry_date: quote.expiry_date.clone(),
            start_date: quote.start_date.clone().unwrap_or_default(),
            supplier: PartyView::from(&quote.supplier),
            client: PartyView::from(&quote.client),
            bank: BankView {
                name: quote.bank.name.clone(),
                iban: quote.bank.iban.clone(),
                bic: quote.bank.bic.clone(),
            },
            conditions: TermsView {
                payment: quote.terms.payment.clone(),
                late_penalties: quote.terms.late_penalties.clone(),
            },
            items: quote
                .items
                .iter()
                .map(|item| LineItemView {
                    description: item.description.clone(),
                    details: item.details.clone(),
                    unit_price: format_amount(&item.unit_price),
                    quantity: item.quantity,
                    tax_rate: format_rate(&item.tax_rate_percent),
                    discount: format_amount(&item.discount),
                    total_ht: format_amount(&item.subtotal()),
                    total_tva: format_amount(&item.tax()),
                    total_ttc: format_amount(&item.total()),
                })
                .collect(),
            totals: TotalsView::from(&quote.totals),
            computed_totals: quote
                .is_overridden()
                .then(|| TotalsView::from(&quote.computed_totals)),
            tax_breakdown: quote
                .tax_breakdown()
                .into_iter()
                .map(|line| TaxLineView {
                    rate: format_rate(&line.rate),
                    base_ht: format_amount(&line.base),
                    tax: format_amount(&line.tax),
                })
                .collect(),
        }
    }
}
