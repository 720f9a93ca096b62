//! Builder for constructing Settings.

use super::{Settings, core::DEFAULT_QUEUE_CAPACITY};
use crate::bundler::ExcludeMatcher;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_assets::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_assets::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .roots(["static", "public"])
///     .exclude(["*.map"])
///     .workers(4)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    roots: Vec<PathBuf>,
    exclude: Vec<String>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds one asset root.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.roots.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds several asset roots.
    ///
    /// # Required
    ///
    /// At least one root is required for building.
    pub fn roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.roots
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Sets the exclusion glob patterns.
    ///
    /// Default: nothing excluded
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the number of compression workers.
    ///
    /// Default: number of logical CPUs
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the work queue capacity.
    ///
    /// Default: 128
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - no root was given
    /// - an exclusion pattern is malformed
    pub fn build(self) -> crate::bundler::Result<Settings> {
        if self.roots.is_empty() {
            crate::bail!("at least one asset root is required");
        }

        let exclude = ExcludeMatcher::new(&self.exclude)?;
        let workers = self.workers.unwrap_or_else(num_cpus::get);

        Ok(Settings::new(
            self.roots,
            exclude,
            workers,
            self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error;

    #[test]
    fn defaults_use_host_parallelism() {
        let settings = SettingsBuilder::new().root("static").build().unwrap();
        assert_eq!(settings.workers(), num_cpus::get().max(1));
        assert_eq!(settings.queue_capacity(), DEFAULT_QUEUE_CAPACITY);
        assert!(settings.exclude().is_empty());
        assert_eq!(settings.roots(), [PathBuf::from("static")]);
    }

    #[test]
    fn zero_workers_is_clamped() {
        let settings = SettingsBuilder::new()
            .root("static")
            .workers(0)
            .queue_capacity(0)
            .build()
            .unwrap();
        assert_eq!(settings.workers(), 1);
        assert_eq!(settings.queue_capacity(), 1);
    }

    #[test]
    fn missing_root_is_rejected() {
        assert!(matches!(
            SettingsBuilder::new().build(),
            Err(Error::GenericError(_))
        ));
    }

    #[test]
    fn bad_pattern_fails_before_io() {
        let err = SettingsBuilder::new()
            .root("/definitely/not/here")
            .exclude(["[z-a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
