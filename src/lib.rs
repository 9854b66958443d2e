mod macros;

pub mod config;
pub mod data;
pub mod error;
pub mod journal;
pub mod prelude;
pub mod report;
pub mod trade;

pub use journal::Journal;
