//! Core Settings struct and implementations.

use crate::bundler::ExcludeMatcher;
use std::path::PathBuf;

/// Default capacity of the walker → worker queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 128;

/// Settings for one asset compilation run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which compiles
/// the exclusion patterns so that configuration errors surface before any
/// filesystem work starts.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_assets::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_assets::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("static")
///     .exclude(["*.scss", "templates/*"])
///     .build()?;
/// assert_eq!(settings.roots().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directories to compile, in command-line order.
    roots: Vec<PathBuf>,

    /// Compiled exclusion patterns.
    exclude: ExcludeMatcher,

    /// Number of compression workers.
    ///
    /// Defaults to the host parallelism.
    workers: usize,

    /// Capacity of the bounded work queue.
    queue_capacity: usize,
}

impl Settings {
    /// Returns the asset roots.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns the exclusion matcher.
    pub fn exclude(&self) -> &ExcludeMatcher {
        &self.exclude
    }

    /// Returns the number of compression workers (always at least one).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the capacity of the work queue (always at least one).
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        roots: Vec<PathBuf>,
        exclude: ExcludeMatcher,
        workers: usize,
        queue_capacity: usize,
    ) -> Self {
        Self {
            roots,
            exclude,
            workers: workers.max(1),
            queue_capacity: queue_capacity.max(1),
        }
    }
}
