// ABOUTME: Dynamically-typed value model shared by variables and filters
// ABOUTME: Exports the Value enum, its coercions, and native primitive ingestion

pub mod native;
pub mod types;

pub use native::Native;
pub use types::{parse_decimal, parse_integer, Value};
