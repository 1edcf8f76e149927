pub mod config;
pub mod ean;
