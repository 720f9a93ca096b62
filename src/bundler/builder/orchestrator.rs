//! Pipeline orchestration: walker → bounded queue → workers → aggregator.

use super::{
    compress::Compressor,
    walker::{self, WorkItem},
};
use crate::bundler::{AssetRecord, Error, Result, Settings};
use crossbeam::channel::{self, Receiver};
use std::time::Instant;

/// Asset compilation orchestrator.
///
/// One walker thread fills a bounded queue; `settings.workers()` threads
/// drain it, each building its own partial list; the lists are joined and
/// sorted into the final bundle.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_assets::bundler::{Bundler, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_assets::bundler::Result<()> {
/// let settings = SettingsBuilder::new().root("static").build()?;
/// let assets = Bundler::new(settings).compile()?;
/// for asset in &assets {
///     println!("{} ({} bytes)", asset.name, asset.size());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a bundler for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns the settings this bundler runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs a full build and returns the records sorted by name.
    ///
    /// # Errors
    ///
    /// The first walker or worker failure aborts the build; no partial list
    /// is ever returned.
    pub fn compile(&self) -> Result<Vec<AssetRecord>> {
        let started = Instant::now();
        let workers = self.settings.workers();
        let (tx, rx) = channel::bounded::<WorkItem>(self.settings.queue_capacity());

        let (walked, partials) = std::thread::scope(|scope| {
            let roots = self.settings.roots();
            let exclude = self.settings.exclude();
            let walker = scope.spawn(move || walker::walk(roots, exclude, tx));

            let handles: Vec<_> = (0..workers)
                .map(|id| {
                    let rx = rx.clone();
                    scope.spawn(move || run_worker(id, rx))
                })
                .collect();
            drop(rx);

            let partials: Vec<Result<Vec<AssetRecord>>> = handles
                .into_iter()
                .enumerate()
                .map(|(id, h)| h.join().unwrap_or_else(|_| Err(Error::WorkerPanicked(id))))
                .collect();
            let walked = walker
                .join()
                .unwrap_or_else(|_| Err(Error::GenericError("asset walker panicked".into())));
            (walked, partials)
        });

        let walked = walked?;
        let assets = aggregate(partials)?;
        log::info!(
            "compiled {} assets ({} queued) with {} workers in {:.2?}",
            assets.len(),
            walked,
            workers,
            started.elapsed()
        );
        Ok(assets)
    }
}

/// Drains the queue until it is closed and empty.
fn run_worker(id: usize, queue: Receiver<WorkItem>) -> Result<Vec<AssetRecord>> {
    let mut compressor = Compressor::new();
    let mut assets = Vec::with_capacity(32);
    for item in queue {
        assets.push(compressor.process_one(&item.path, &item.name)?);
    }
    log::debug!("worker {} processed {} assets", id, assets.len());
    Ok(assets)
}

/// Joins per-worker lists into one list sorted by name.
///
/// # Errors
///
/// - the first failed worker's error
/// - [`Error::DuplicateAsset`] when two records share a name
pub fn aggregate<I>(partials: I) -> Result<Vec<AssetRecord>>
where
    I: IntoIterator<Item = Result<Vec<AssetRecord>>>,
{
    let mut assets = Vec::new();
    for partial in partials {
        assets.extend(partial?);
    }
    assets.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    if let Some(pair) = assets.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(Error::DuplicateAsset(pair[0].name.clone()));
    }
    Ok(assets)
}
