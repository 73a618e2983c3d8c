//! Runtime provider configuration.
//!
//! The configuration snapshot is owned by an external admin surface. This
//! crate only reads it, through [`ConfigSnapshot`]. [`InMemoryConfig`] is the
//! implementation used by the server (loaded from a JSON file) and by tests.

mod config_model;
mod config_traits;
mod memory_config;

pub use config_model::*;
pub use config_traits::*;
pub use memory_config::*;
