// Adapters layer: concrete implementations of the domain ports for remote sources.

pub mod cache;
pub mod keyword_source;
pub mod signing;
pub mod supply_source;
