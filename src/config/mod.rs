//! Configuration for the sprite editor
//!
//! Provides types and parsing for the optional `sprite.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
