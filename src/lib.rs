//! Agora aggregates cybersecurity-related feeds (news, CVE advisories,
//! leak disclosures, ransomware trackers) and prints filtered, paginated
//! results to the console.
//!
//! The normalized records of every feed go through the same
//! filter-paginate engine, whatever their original shape.

pub mod application;
pub mod engine;
pub mod feeds;
pub mod models;
pub mod readers;
pub mod writers;
