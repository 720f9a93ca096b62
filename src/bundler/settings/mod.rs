//! Configuration structures for asset compilation.
//!
//! [`Settings`] is the validated, immutable view of a build; it is only
//! obtainable through [`SettingsBuilder`], which rejects bad configuration
//! before the pipeline starts.

mod builder;
mod core;

pub use builder::SettingsBuilder;
pub use core::{DEFAULT_QUEUE_CAPACITY, Settings};
