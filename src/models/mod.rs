//! In this module are declared the entities manipulated by this program

pub mod record;
pub mod source;

pub use record::{ArticleRecord, FeedRecord, VulnerabilityRecord};
pub use source::{Category, Source, SourceTable};
