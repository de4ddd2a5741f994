pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod views;

pub use application::normalizer::{normalize, Normalizer, DATE_FORMAT};
pub use application::quote_service::QuoteService;
pub use application::sample::sample_request;
pub use config::{ConfigError, NormalizerConfig};
pub use domain::errors::{RenderError, ValidationError};
pub use domain::ports::{DocumentRenderer, RenderedDocument};
pub use domain::quote::{LineItem, Quote, Totals};
pub use errors::AppError;
pub use infrastructure::json_renderer::JsonRenderer;
pub use views::quote_document::QuoteDocument;
