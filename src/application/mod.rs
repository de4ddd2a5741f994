pub mod normalizer;
pub mod quote_service;
pub mod sample;
