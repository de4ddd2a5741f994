pub mod errors;
pub mod money;
pub mod ports;
pub mod quote;
