use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::domain::money::parse_decimal_str;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Defaults the normalizer falls back to when a request leaves a field out.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    pub default_tax_rate: BigDecimal,
    pub validity_days: u32,
    pub number_prefix: String,
    pub supplier_name: String,
    pub bank_name: String,
    pub bank_iban: String,
    pub bank_bic: String,
    pub payment_terms: String,
    pub late_penalties: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_tax_rate: BigDecimal::from(20),
            validity_days: 30,
            number_prefix: "D".to_string(),
            supplier_name: "Votre Entreprise".to_string(),
            bank_name: "Votre Banque".to_string(),
            bank_iban: "FR76 0000 0000 0000 0000 0000 000".to_string(),
            bank_bic: "XXXXXXXX".to_string(),
            payment_terms: "Paiement à 30 jours".to_string(),
            late_penalties: "En cas de retard de paiement, une pénalité de 3 fois le taux \
                             d'intérêt légal sera appliquée"
                .to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, keeping defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("QUOTE_DEFAULT_TAX_RATE") {
            config.default_tax_rate = parse_decimal_str(&raw)
                .filter(|rate| *rate >= BigDecimal::from(0))
                .ok_or(ConfigError::Invalid {
                    key: "QUOTE_DEFAULT_TAX_RATE",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup("QUOTE_VALIDITY_DAYS") {
            config.validity_days = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid {
                    key: "QUOTE_VALIDITY_DAYS",
                    value: raw.clone(),
                })?;
        }

        let text = |key: &str, slot: &mut String| {
            if let Some(v) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = v;
            }
        };
        text("QUOTE_NUMBER_PREFIX", &mut config.number_prefix);
        text("QUOTE_SUPPLIER_NAME", &mut config.supplier_name);
        text("QUOTE_BANK_NAME", &mut config.bank_name);
        text("QUOTE_BANK_IBAN", &mut config.bank_iban);
        text("QUOTE_BANK_BIC", &mut config.bank_bic);
        text("QUOTE_PAYMENT_TERMS", &mut config.payment_terms);
        text("QUOTE_LATE_PENALTIES", &mut config.late_penalties);

        Ok(config)
    }
}
