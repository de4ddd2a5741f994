pub mod quote_document;
