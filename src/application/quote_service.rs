use serde_json::Value;

use crate::application::normalizer::Normalizer;
use crate::domain::money::format_amount;
use crate::domain::ports::{DocumentRenderer, RenderedDocument};
use crate::domain::quote::Quote;
use crate::errors::AppError;

/// Raw request in, rendered document out.
pub struct QuoteService<R> {
    normalizer: Normalizer,
    renderer: R,
}

impl<R: DocumentRenderer> QuoteService<R> {
    pub fn new(normalizer: Normalizer, renderer: R) -> Self {
        Self {
            normalizer,
            renderer,
        }
    }

    pub fn prepare(&self, raw: &Value) -> Result<Quote, AppError> {
        self.normalizer.normalize(raw).map_err(|e| {
            log::warn!("Quote rejected ({}): {}", e.kind(), e);
            AppError::from(e)
        })
    }

    pub fn generate(&self, raw: &Value) -> Result<RenderedDocument, AppError> {
        let quote = self.prepare(raw)?;
        self.render(&quote)
    }

    pub fn render(&self, quote: &Quote) -> Result<RenderedDocument, AppError> {
        let document = self.renderer.render(quote).map_err(|e| {
            log::error!("Failed to render quote {}: {}", quote.number, e);
            AppError::from(e)
        })?;

        log::info!(
            "Quote generated: {} - {} - {} €",
            quote.number,
            quote.client.name,
            format_amount(&quote.totals.total_ttc)
        );
        Ok(document)
    }
}
