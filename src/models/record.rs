//! The normalized records extracted from the feeds.
//! Whatever the shape of the remote document, the adapters turn each of
//! its entries into a [`FeedRecord`] so the engine and the writers can
//! work on a single type.

use chrono::{NaiveDate, NaiveDateTime};

/// The author put in an [`ArticleRecord`] when the feed doesn't provide one.
pub const UNKNOWN_AUTHOR: &str = "unknown author";

/// An entry of a syndication feed (news, leak or ransom categories).
pub struct ArticleRecord {
    /// The title of the article
    pub title: String,
    /// The description of the article
    pub description: String,
    /// The author of the article
    /// Feeds often omit it, in that case it is [`UNKNOWN_AUTHOR`]
    pub author: String,
    /// The publication date as displayed to the user.
    /// Either the extracted `DD Mon YYYY HH:MM:SS` substring, or the raw
    /// text of the feed when the pattern didn't match.
    pub date_text: String,
    /// The parsed publication date
    /// None when the raw date didn't contain a parseable substring. Such
    /// a record cannot be compared to the date bounds and always passes
    /// the date filter.
    pub published: Option<NaiveDateTime>,
    /// The URL of the article
    pub link: String,
}

/// An entry of a JSON vulnerability catalog (cve category).
pub struct VulnerabilityRecord {
    /// The CVE identifier, e.g. CVE-2021-44228
    pub cve_id: String,
    /// The human-readable name of the vulnerability
    pub name: String,
    /// The date the vulnerability was added to the catalog
    /// None when the catalog omitted the field or provided a malformed
    /// one. Such a record always passes the date filter and is displayed
    /// with an empty date.
    pub date_added: Option<NaiveDate>,
    /// The short description of the vulnerability
    pub description: String,
}

/// A normalized feed entry, ready for filtering and display.
pub enum FeedRecord {
    /// An entry coming from a syndication feed
    Article(ArticleRecord),
    /// An entry coming from a JSON vulnerability catalog
    Vulnerability(VulnerabilityRecord),
}

impl FeedRecord {
    /// Checks whether the record matches the given keyword.
    /// The comparison is a case-insensitive substring search. Articles
    /// are searched on their title only, while vulnerabilities match if
    /// ANY of the CVE id, the name or the description contains the
    /// keyword. The asymmetry is deliberate.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        match self {
            Self::Article(article) => article.title.to_lowercase().contains(&keyword),
            Self::Vulnerability(vulnerability) => {
                vulnerability.cve_id.to_lowercase().contains(&keyword)
                    || vulnerability.name.to_lowercase().contains(&keyword)
                    || vulnerability.description.to_lowercase().contains(&keyword)
            }
        }
    }

    /// Returns the date the record can be compared on, if it has one.
    /// Articles compare on the day of their publication timestamp, so
    /// the date bounds are inclusive over the whole day.
    pub fn comparable_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Article(article) => article.published.map(|published| published.date()),
            Self::Vulnerability(vulnerability) => vulnerability.date_added,
        }
    }
}
