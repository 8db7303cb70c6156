//! This module declares the feed adapters.
//! An adapter takes the raw body of a fetched document and normalizes
//! its entries into [`FeedRecord`]s. Two shapes are handled: syndication
//! feeds and JSON vulnerability catalogs.

pub mod syndication;
pub mod vulnerability;

use crate::models::FeedRecord;

/// A common interface between all feed adapters.
pub trait FeedAdapter {
    /// Normalizes the entries of a raw feed body.
    /// A body that cannot be parsed at all is an error, reported to the
    /// caller as a per-source failure. An entry missing one of its
    /// searchable fields is skipped without failing the batch.
    fn normalize(&self, body: &str) -> Result<Vec<FeedRecord>, String>;
}
