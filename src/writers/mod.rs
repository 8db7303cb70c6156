//! Writing the records
//!
//! After the engine finishes its work, it's up to a writer to display
//! the pages of [`FeedRecord`]s. It provides a common interface, so the
//! engine and the dispatcher don't depend on how the records are shown.

pub mod textstdout;

use crate::models::{Category, FeedRecord};

/// A trait to have a common interface between writers.
/// A writer has the responsibility to display the records of one page,
/// and the per-source banner announcing them.
pub trait Writer {
    /// Writes the banner announcing the results of one source
    fn write_banner(&self, category: Category, source_name: &str, keyword: Option<&str>);

    /// Writes the records of one page
    fn write_page(&self, records: &[FeedRecord]);
}
