//! The syndication feed adapter.
//! This module contains the adapter used to normalize RSS documents
//! into article records.

use chrono::NaiveDateTime;
use log::{debug, info, trace};
use regex::Regex;
use rss::Channel;

use super::FeedAdapter;
use crate::models::record::UNKNOWN_AUTHOR;
use crate::models::{ArticleRecord, FeedRecord};

/// The strptime-style format matching [`DATE_PATTERN`]
const DATE_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// The substring extracted from the raw pubDate of an item.
/// Feeds publish RFC822-style dates ("Tue, 04 Jan 2024 10:15:00 +0000"),
/// only the "04 Jan 2024 10:15:00" part is kept and compared.
const DATE_PATTERN: &str = r"\d{2} \w{3} \d{4} \d{2}:\d{2}:\d{2}";

/// The adapter for syndication feeds.
pub struct SyndicationAdapter {
    /// The regex used to extract the date substring, compiled once
    date_regex: Regex,
}

impl SyndicationAdapter {
    /// Creates the adapter.
    /// By doing so, the regex is compiled once and the adapter can be
    /// reused for every source of the run.
    pub fn new() -> Self {
        let date_regex = Regex::new(DATE_PATTERN).unwrap();
        Self { date_regex }
    }

    /// Extracts the displayed date and the comparable timestamp from the
    /// raw pubDate text.
    /// When the pattern doesn't match, the raw text is displayed as-is
    /// and no timestamp is produced: the record then always passes the
    /// date filter. The tolerance is deliberate, a source using another
    /// date format must not see its whole feed excluded.
    fn extract_date(&self, raw: &str) -> (String, Option<NaiveDateTime>) {
        match self.date_regex.find(raw) {
            Some(matched) => {
                let text = matched.as_str().to_string();
                let published = NaiveDateTime::parse_from_str(&text, DATE_FORMAT).ok();
                if published.is_none() {
                    debug!("Date substring {} matched but didn't parse", text);
                }
                (text, published)
            }
            None => {
                debug!("No date substring found in {:?}", raw);
                (raw.to_string(), None)
            }
        }
    }
}

impl FeedAdapter for SyndicationAdapter {
    /// Normalizes the items of an RSS document.
    fn normalize(&self, body: &str) -> Result<Vec<FeedRecord>, String> {
        trace!("Running SyndicationAdapter::normalize()");
        let channel = Channel::read_from(body.as_bytes())
            .map_err(|e| format!("unable to parse the feed: {}", e))?;

        let mut records = Vec::new();
        for item in channel.items() {
            // Title and description are the searchable fields, an item
            // missing one of them is skipped, not an error
            let (title, description) = match (item.title(), item.description()) {
                (Some(title), Some(description)) => (title, description),
                _ => {
                    debug!("Skipping an item without title or description");
                    continue;
                }
            };

            let author = item.author().unwrap_or(UNKNOWN_AUTHOR);
            let (date_text, published) = self.extract_date(item.pub_date().unwrap_or(""));
            let link = item.link().unwrap_or("");

            records.push(FeedRecord::Article(ArticleRecord {
                title: title.to_string(),
                description: description.to_string(),
                author: author.to_string(),
                date_text,
                published,
                link: link.to_string(),
            }));
        }

        info!("Normalized {} article records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn feed_with_items(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example security blog</title>
    <link>https://www.example.com/</link>
    <description>Threat research</description>
    {}
  </channel>
</rss>"#,
            items
        )
    }

    #[test]
    fn normalizes_a_complete_item() {
        let body = feed_with_items(
            r#"<item>
  <title>New phishing campaign</title>
  <description>Credential harvesting at scale</description>
  <author>researcher@example.com</author>
  <pubDate>Tue, 04 Jan 2024 10:15:00 +0000</pubDate>
  <link>https://www.example.com/phishing</link>
</item>"#,
        );
        let records = SyndicationAdapter::new().normalize(&body).unwrap();
        assert_eq!(1, records.len());
        let FeedRecord::Article(article) = &records[0] else {
            panic!("Expected an article record");
        };
        assert_eq!("New phishing campaign", article.title);
        assert_eq!("Credential harvesting at scale", article.description);
        assert_eq!("researcher@example.com", article.author);
        assert_eq!("04 Jan 2024 10:15:00", article.date_text);
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 1, 4)
                .unwrap()
                .and_hms_opt(10, 15, 0),
            article.published
        );
        assert_eq!("https://www.example.com/phishing", article.link);
    }

    #[test]
    fn missing_author_gets_the_sentinel() {
        let body = feed_with_items(
            r#"<item>
  <title>Botnet dismantled</title>
  <description>Takedown details</description>
  <pubDate>Mon, 12 Feb 2024 08:00:00 GMT</pubDate>
  <link>https://www.example.com/botnet</link>
</item>"#,
        );
        let records = SyndicationAdapter::new().normalize(&body).unwrap();
        let FeedRecord::Article(article) = &records[0] else {
            panic!("Expected an article record");
        };
        assert_eq!(UNKNOWN_AUTHOR, article.author);
    }

    #[test]
    fn unmatched_date_keeps_raw_text_without_timestamp() {
        let body = feed_with_items(
            r#"<item>
  <title>Advisory</title>
  <description>Details</description>
  <pubDate>2024-01-04T10:15:00Z</pubDate>
  <link>https://www.example.com/advisory</link>
</item>"#,
        );
        let records = SyndicationAdapter::new().normalize(&body).unwrap();
        let FeedRecord::Article(article) = &records[0] else {
            panic!("Expected an article record");
        };
        // ISO dates don't match the DD Mon YYYY pattern
        assert_eq!("2024-01-04T10:15:00Z", article.date_text);
        assert!(article.published.is_none());
        assert!(records[0].comparable_date().is_none());
    }

    #[test]
    fn item_without_description_is_skipped() {
        let body = feed_with_items(
            r#"<item>
  <title>Only a title</title>
  <link>https://www.example.com/short</link>
</item>
<item>
  <title>Complete item</title>
  <description>Has everything needed</description>
  <link>https://www.example.com/full</link>
</item>"#,
        );
        let records = SyndicationAdapter::new().normalize(&body).unwrap();
        assert_eq!(1, records.len());
        let FeedRecord::Article(article) = &records[0] else {
            panic!("Expected an article record");
        };
        assert_eq!("Complete item", article.title);
    }

    #[test]
    fn invalid_document_is_an_error() {
        let result = SyndicationAdapter::new().normalize("this is not XML at all");
        assert!(result.is_err());
    }
}
