pub mod domain;
pub mod filter;
