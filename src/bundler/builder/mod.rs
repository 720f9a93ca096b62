//! Asset compilation pipeline.
//!
//! This module provides the [`Bundler`] orchestrator that turns asset roots
//! into a sorted list of [`AssetRecord`](crate::bundler::AssetRecord)s.
//!
//! # Overview
//!
//! 1. [`walker`] enumerates each root, skipping hidden and excluded entries,
//!    and feeds a bounded queue
//! 2. [`compress`] workers drain the queue, reading, hashing and gzipping
//!    each file and keeping the smaller form
//! 3. [`orchestrator::aggregate`] joins the per-worker lists and sorts them
//!    by name for reproducible output
//!
//! # Module Organization
//!
//! - [`compress`] - per-file compress-or-store decision
//! - [`orchestrator`] - main [`Bundler`] struct and fan-in
//! - [`walker`] - directory traversal

pub mod compress;
pub mod orchestrator;
pub mod walker;

pub use compress::{Compressor, prefer_compressed};
pub use orchestrator::{Bundler, aggregate};
pub use walker::WorkItem;
