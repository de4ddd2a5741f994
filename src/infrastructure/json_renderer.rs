use crate::domain::errors::RenderError;
use crate::domain::ports::{DocumentRenderer, RenderedDocument};
use crate::domain::quote::Quote;
use crate::views::quote_document::QuoteDocument;

/// Renders the document view as JSON. Stands in for a PDF engine wherever
/// the structured form is enough (CLI output, tests, downstream services).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentRenderer for JsonRenderer {
    fn render(&self, quote: &Quote) -> Result<RenderedDocument, RenderError> {
        let document = QuoteDocument::from(quote);
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };

        Ok(RenderedDocument {
            bytes,
            content_type: "application/json",
            file_name: format!("devis_{}.json", quote.number),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::application::normalizer::normalize;

    fn quote() -> Quote {
        normalize(&json!({
            "numero": "D-2024-F00D42",
            "client_nom": "Acme",
            "items": [{ "description": "Consulting", "prix_unitaire": 500.0, "quantite": 2 }]
        }))
        .unwrap()
    }

    #[test]
    fn renders_document_view_as_json() {
        let document = JsonRenderer::new().render(&quote()).unwrap();

        assert_eq!(document.content_type, "application/json");
        assert_eq!(document.file_name, "devis_D-2024-F00D42.json");

        let value: Value = serde_json::from_slice(&document.bytes).unwrap();
        assert_eq!(value["numero"], "D-2024-F00D42");
        assert_eq!(value["totaux"]["total_ttc"], "1200.00");
    }

    #[test]
    fn pretty_output_is_the_same_document() {
        let compact = JsonRenderer::new().render(&quote()).unwrap();
        let pretty = JsonRenderer::pretty().render(&quote()).unwrap();

        assert!(pretty.bytes.len() > compact.bytes.len());
        let a: Value = serde_json::from_slice(&compact.bytes).unwrap();
        let b: Value = serde_json::from_slice(&pretty.bytes).unwrap();
        assert_eq!(a, b);
    }
}
