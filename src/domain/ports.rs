use super::errors::RenderError;
use super::quote::Quote;

/// A finished document ready to be streamed back to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

/// Turns a normalized quote into a document. Implementations never see raw
/// input, only quotes that passed validation.
pub trait DocumentRenderer: Send + Sync + 'static {
    fn render(&self, quote: &Quote) -> Result<RenderedDocument, RenderError>;
}
