//! Lamp model, state store and view transforms for lamp-grid.
//!
//! The [`store::LampStore`] owns the 99-lamp collection and applies the
//! pure operations in [`ops`]; the [`views`] turn its state into render
//! commands for whichever renderer is attached.

pub mod config;
pub mod error;
pub mod intensity;
pub mod model;
pub mod ops;
pub mod persist;
pub mod store;
pub mod svg;
pub mod views;

pub use config::LampGridConfig;
pub use error::{ConfigError, LoadError, StorageError};
pub use intensity::VisualIntensity;
pub use model::{Lamp, LampCollection};
pub use store::{LampStore, Origin, StoreStats};
