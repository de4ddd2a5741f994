use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::NormalizerConfig;
use crate::domain::errors::ValidationError;
use crate::domain::money::{parse_decimal, parse_integer};
use crate::domain::quote::{
    BankDetails, LineItem, Party, PaymentTerms, Quote, Totals, TotalsOverride,
};

/// Display format of every date carried by a quote.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Turns raw request bodies into validated quotes.
///
/// Pure apart from the two defaults that need the outside world: today's
/// date and the random suffix of a generated quote number.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

/// Normalize with the default configuration and today's local date.
pub fn normalize(raw: &Value) -> Result<Quote, ValidationError> {
    Normalizer::default().normalize(raw)
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, raw: &Value) -> Result<Quote, ValidationError> {
        self.normalize_on(raw, Local::now().date_naive())
    }

    /// Normalize using `today` as the base for default dates.
    ///
    /// Checks run in a fixed order and the first violation is returned:
    /// body, `client_nom`, `items`, each item in turn, then override totals.
    pub fn normalize_on(&self, raw: &Value, today: NaiveDate) -> Result<Quote, ValidationError> {
        let body = match raw {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(ValidationError::MissingBody),
        };

        let client_name =
            required_text(body, "client_nom").ok_or(ValidationError::MissingField("client_nom"))?;

        let raw_items = match present(body, "items") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ValidationError::MissingItems),
        };
        let items = raw_items
            .iter()
            .enumerate()
            .map(|(i, item)| self.line_item(i + 1, item))
            .collect::<Result<Vec<_>, _>>()?;

        let overrides = totals_override(body)?;
        let computed_totals = Totals::from_items(&items);
        let totals = overrides.apply(&computed_totals);
        if !overrides.is_empty() {
            log::debug!("Caller-supplied totals applied: {:?}", overrides);
        }

        let number = text(body, "numero").unwrap_or_else(|| self.generate_number(today));

        let supplied_issue = text(body, "date_emission");
        let base = supplied_issue
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
            .unwrap_or(today);
        let issue_date = supplied_issue.unwrap_or_else(|| today.format(DATE_FORMAT).to_string());
        let expiry_date = text(body, "date_expiration").unwrap_or_else(|| {
            base.checked_add_days(Days::new(u64::from(self.config.validity_days)))
                .unwrap_or(NaiveDate::MAX)
                .format(DATE_FORMAT)
                .to_string()
        });

        let mut supplier = party(body, "fournisseur");
        if supplier.name.is_empty() {
            supplier.name = self.config.supplier_name.clone();
        }
        let client = Party {
            name: client_name,
            ..party(body, "client")
        };

        Ok(Quote {
            number,
            issue_date,
            expiry_date,
            start_date: text(body, "date_debut"),
            supplier,
            client,
            bank: BankDetails {
                name: text(body, "banque_nom").unwrap_or_else(|| self.config.bank_name.clone()),
                iban: text(body, "banque_iban").unwrap_or_else(|| self.config.bank_iban.clone()),
                bic: text(body, "banque_bic").unwrap_or_else(|| self.config.bank_bic.clone()),
            },
            terms: PaymentTerms {
                payment: text(body, "conditions_paiement")
                    .unwrap_or_else(|| self.config.payment_terms.clone()),
                late_penalties: text(body, "penalites_retard")
                    .unwrap_or_else(|| self.config.late_penalties.clone()),
            },
            items,
            computed_totals,
            totals,
        })
    }

    fn line_item(&self, index: usize, raw: &Value) -> Result<LineItem, ValidationError> {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);
        let invalid = |field: &'static str| ValidationError::InvalidItem(index, field);

        let description =
            required_text(fields, "description").ok_or_else(|| invalid("description"))?;

        let unit_price = present(fields, "prix_unitaire")
            .and_then(parse_decimal)
            .filter(|price| *price > BigDecimal::zero())
            .ok_or_else(|| invalid("prix_unitaire"))?;

        // An explicit null is a bad quantity, not a missing one.
        let quantity = match fields.get("quantite") {
            None => 1,
            Some(v) => parse_integer(v)
                .filter(|q| *q > 0)
                .ok_or_else(|| invalid("quantite"))?,
        };

        let tax_rate_percent = match present(fields, "tva_taux") {
            None => self.config.default_tax_rate.clone(),
            Some(v) => parse_decimal(v)
                .filter(|rate| *rate >= BigDecimal::zero())
                .ok_or_else(|| invalid("tva_taux"))?,
        };

        let gross = &unit_price * &BigDecimal::from(quantity);
        let discount = match present(fields, "remise") {
            None => BigDecimal::zero(),
            Some(v) => parse_decimal(v)
                .filter(|d| *d >= BigDecimal::zero() && *d <= gross)
                .ok_or_else(|| invalid("remise"))?,
        };

        let details = present(fields, "details")
            .and_then(Value::as_array)
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(LineItem {
            description,
            details,
            unit_price,
            quantity,
            tax_rate_percent,
            discount,
        })
    }

    /// `{prefix}-{year}-{6 upper-case hex digits}`.
    fn generate_number(&self, today: NaiveDate) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let number = format!(
            "{}-{}-{}",
            self.config.number_prefix,
            today.year(),
            id[..6].to_uppercase()
        );
        log::debug!("Generated quote number {}", number);
        number
    }
}

/// A field counts as present unless it is missing or null.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// Non-blank strings are taken as-is, numbers are stringified, anything else
/// is treated as absent.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match present(fields, key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`text`], but any non-empty string counts, whitespace included.
fn required_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match present(fields, key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn party(fields: &Map<String, Value>, prefix: &str) -> Party {
    let field = |suffix: &str| text(fields, &format!("{prefix}_{suffix}")).unwrap_or_default();
    Party {
        name: field("nom"),
        address: field("adresse"),
        city: field("ville"),
        email: field("email"),
        tax_id: field("siret"),
        phone: field("telephone"),
    }
}

fn totals_override(fields: &Map<String, Value>) -> Result<TotalsOverride, ValidationError> {
    let amount = |key: &'static str| {
        present(fields, key)
            .map(|v| parse_decimal(v).ok_or(ValidationError::InvalidField(key)))
            .transpose()
    };
    Ok(TotalsOverride {
        total_ht: amount("total_ht")?,
        total_tax: amount("total_tva")?,
        total_ttc: amount("total_ttc")?,
    })
}
