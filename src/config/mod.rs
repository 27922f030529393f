//! Configuration module for realmgrid
//!
//! Provides types, discovery and parsing for `realm.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
