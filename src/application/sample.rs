use chrono::{Days, NaiveDate};
use serde_json::{json, Value};

use super::normalizer::DATE_FORMAT;

/// A complete request body exercising every supported field.
pub fn sample_request(today: NaiveDate) -> Value {
    let fmt = |date: Option<NaiveDate>| date.unwrap_or(today).format(DATE_FORMAT).to_string();

    json!({
        "numero": format!("FORM-{}-001", today.format("%Y%m%d")),
        "date_emission": fmt(Some(today)),
        "date_expiration": fmt(today.checked_add_days(Days::new(30))),
        "date_debut": fmt(today.checked_add_days(Days::new(7))),

        "fournisseur_nom": "Formation Web Academy",
        "fournisseur_adresse": "123 Rue de la Formation",
        "fournisseur_ville": "75001 Paris, France",
        "fournisseur_email": "contact@formation-web.fr",
        "fournisseur_siret": "12345678901234",
        "fournisseur_telephone": "+33 1 23 45 67 89",

        "client_nom": "Entreprise Cliente SARL",
        "client_adresse": "456 Avenue du Commerce",
        "client_ville": "69000 Lyon, France",
        "client_email": "client@entreprise.com",
        "client_siret": "98765432109876",
        "client_telephone": "+33 4 56 78 90 12",

        "banque_nom": "Banque Populaire",
        "banque_iban": "FR76 1234 5678 9012 3456 7890 123",
        "banque_bic": "CCBPFRPPXXX",

        "items": [
            {
                "description": "Formation développement web complète",
                "prix_unitaire": 800.0,
                "quantite": 5
            },
            {
                "description": "Support technique post-formation",
                "prix_unitaire": 150.0,
                "quantite": 2
            },
            {
                "description": "Accès plateforme e-learning (1 an)",
                "prix_unitaire": 299.0,
                "quantite": 1
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::application::normalizer::Normalizer;

    #[test]
    fn sample_normalizes_to_expected_totals() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 27).unwrap();
        let quote = Normalizer::default()
            .normalize_on(&sample_request(today), today)
            .unwrap();

        assert_eq!(quote.number, "FORM-20240927-001");
        assert_eq!(quote.start_date.as_deref(), Some("04/10/2024"));
        assert_eq!(quote.expiry_date, "27/10/2024");
        assert_eq!(quote.items.len(), 3);
        assert_eq!(quote.totals.total_ht, BigDecimal::from(4599));
        assert_eq!(
            quote.totals.total_tax,
            BigDecimal::from_str("919.8").unwrap()
        );
        assert_eq!(
            quote.totals.total_ttc,
            BigDecimal::from_str("5518.8").unwrap()
        );
    }
}
