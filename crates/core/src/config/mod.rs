//! Configuration loading and schema definitions
//!
//! Settings come from an optional TOML file; every key has a default.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
