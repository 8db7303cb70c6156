//! The filter-paginate engine.
//! This is the piece both feed paths funnel through: it applies the
//! keyword and date predicates to the normalized records of one source,
//! then serves the matches in fixed-size pages, consulting a gate
//! between pages so the driver decides whether to go on.

use chrono::NaiveDate;
use log::{debug, info, trace};

use crate::models::FeedRecord;
use crate::writers::Writer;

/// The number of records per page when none is asked
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The active predicates of a run.
/// Every field is optional, an absent one always passes.
pub struct FilterOptions {
    /// Case-insensitive substring searched in the keyword fields
    pub keyword: Option<String>,
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
}

impl FilterOptions {
    /// Checks whether a record passes both predicates.
    /// A record without a comparable date passes the date predicate
    /// unconditionally.
    fn matches(&self, record: &FeedRecord) -> bool {
        if let Some(keyword) = &self.keyword {
            if !record.matches_keyword(keyword) {
                return false;
            }
        }

        if let Some(date) = record.comparable_date() {
            if let Some(start_date) = self.start_date {
                if date < start_date {
                    return false;
                }
            }
            if let Some(end_date) = self.end_date {
                if date > end_date {
                    return false;
                }
            }
        }

        true
    }
}

/// Filters the records of one source in a single pass.
/// The relative order of the records is preserved.
pub fn filter_records(records: Vec<FeedRecord>, options: &FilterOptions) -> Vec<FeedRecord> {
    trace!("Running filter_records()");
    let total = records.len();
    let kept: Vec<FeedRecord> = records
        .into_iter()
        .filter(|record| options.matches(record))
        .collect();
    info!("Kept {} records out of {}", kept.len(), total);
    kept
}

/// The decision of a [`PageGate`] after a page has been displayed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageDecision {
    /// Display the next page
    Continue,
    /// Stop paging this source, the remaining pages are not shown
    Stop,
}

/// A common interface between pagination gates.
/// The engine consults the gate after every page except the last one.
/// The console gate blocks on user input, another driver could decide
/// without any interaction.
pub trait PageGate {
    /// Decides whether the next page must be displayed
    fn next_page(&mut self) -> PageDecision;
}

/// Serves a filtered record list in fixed-size pages.
pub struct Paginator {
    /// The filtered records, in original feed order
    records: Vec<FeedRecord>,
    /// The number of records per page
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator over a filtered record list.
    /// A page size of zero is meaningless and is raised to one.
    pub fn new(records: Vec<FeedRecord>, page_size: usize) -> Self {
        Paginator {
            records,
            page_size: page_size.max(1),
        }
    }

    /// The number of pages: ceiling of records over page size
    pub fn total_pages(&self) -> usize {
        (self.records.len() + self.page_size - 1) / self.page_size
    }

    /// The records of the given page, pages are numbered from 0
    pub fn page(&self, number: usize) -> &[FeedRecord] {
        let from = number * self.page_size;
        let to = (from + self.page_size).min(self.records.len());
        &self.records[from..to]
    }

    /// Displays the pages in order through the writer.
    /// After every page except the last one, the gate is consulted and a
    /// [`PageDecision::Stop`] ends the paging of this source. With zero
    /// records, nothing is written and the gate is never consulted.
    pub fn serve(&self, writer: &dyn Writer, gate: &mut dyn PageGate) {
        trace!("Running Paginator::serve()");
        let total_pages = self.total_pages();
        debug!(
            "{} records to display on {} pages",
            self.records.len(),
            total_pages
        );

        let mut current_page = 0;
        while current_page < total_pages {
            writer.write_page(self.page(current_page));

            if current_page < total_pages - 1 && gate.next_page() == PageDecision::Stop {
                debug!("Paging stopped at page {}", current_page);
                break;
            }
            current_page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::UNKNOWN_AUTHOR;
    use crate::models::{ArticleRecord, Category, VulnerabilityRecord};
    use std::cell::RefCell;

    fn article(title: &str, published: Option<(i32, u32, u32, u32)>) -> FeedRecord {
        FeedRecord::Article(ArticleRecord {
            title: title.to_string(),
            description: "description".to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            date_text: "04 Jan 2024 10:15:00".to_string(),
            published: published.and_then(|(y, m, d, h)| {
                NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0)
            }),
            link: "https://www.example.com/".to_string(),
        })
    }

    fn vulnerability(cve_id: &str, description: &str, date: Option<(i32, u32, u32)>) -> FeedRecord {
        FeedRecord::Vulnerability(VulnerabilityRecord {
            cve_id: cve_id.to_string(),
            name: "Some vulnerability".to_string(),
            date_added: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            description: description.to_string(),
        })
    }

    fn titles(records: &[FeedRecord]) -> Vec<String> {
        records
            .iter()
            .map(|record| match record {
                FeedRecord::Article(article) => article.title.clone(),
                FeedRecord::Vulnerability(vulnerability) => vulnerability.cve_id.clone(),
            })
            .collect()
    }

    fn keyword_options(keyword: &str) -> FilterOptions {
        FilterOptions {
            keyword: Some(keyword.to_string()),
            start_date: None,
            end_date: None,
        }
    }

    fn date_options(start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>) -> FilterOptions {
        FilterOptions {
            keyword: None,
            start_date: start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            end_date: end.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    /// A writer recording the pages it is asked to display
    struct RecordingWriter {
        pages: RefCell<Vec<Vec<String>>>,
    }

    impl RecordingWriter {
        fn new() -> Self {
            RecordingWriter {
                pages: RefCell::new(Vec::new()),
            }
        }
    }

    impl Writer for RecordingWriter {
        fn write_banner(&self, _category: Category, _source_name: &str, _keyword: Option<&str>) {}

        fn write_page(&self, records: &[FeedRecord]) {
            self.pages.borrow_mut().push(titles(records));
        }
    }

    /// A gate returning a fixed decision and counting how often it is asked
    struct CountingGate {
        decision: PageDecision,
        consulted: usize,
    }

    impl CountingGate {
        fn new(decision: PageDecision) -> Self {
            CountingGate {
                decision,
                consulted: 0,
            }
        }
    }

    impl PageGate for CountingGate {
        fn next_page(&mut self) -> PageDecision {
            self.consulted += 1;
            self.decision
        }
    }

    #[test]
    fn keyword_filtering_is_idempotent() {
        let records = vec![
            article("Log4j exploited in the wild", None),
            article("Unrelated story", None),
            article("Another Log4j write-up", None),
        ];
        let options = keyword_options("log4j");
        let filtered = filter_records(records, &options);
        let filtered_titles = titles(&filtered);
        let refiltered = filter_records(filtered, &options);
        assert_eq!(filtered_titles, titles(&refiltered));
        assert_eq!(2, refiltered.len());
    }

    #[test]
    fn article_keyword_ignores_description() {
        let records = vec![article("Quiet title", None)];
        // The description contains "description" but articles only
        // search their title
        let filtered = filter_records(records, &keyword_options("description"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn vulnerability_keyword_matches_on_description_alone() {
        let records = vec![vulnerability(
            "CVE-2024-0001",
            "Chained with a Log4j flaw",
            Some((2024, 3, 1)),
        )];
        let filtered = filter_records(records, &keyword_options("log4j"));
        assert_eq!(1, filtered.len());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = vec![vulnerability(
            "CVE-2024-0002",
            "description",
            Some((2024, 3, 1)),
        )];
        let filtered = filter_records(
            records,
            &date_options(Some((2024, 3, 1)), Some((2024, 3, 1))),
        );
        assert_eq!(1, filtered.len());
    }

    #[test]
    fn article_on_the_end_date_is_retained_whatever_the_hour() {
        let records = vec![article("Late publication", Some((2024, 3, 1, 22)))];
        let filtered = filter_records(
            records,
            &date_options(Some((2024, 2, 1)), Some((2024, 3, 1))),
        );
        assert_eq!(1, filtered.len());
    }

    #[test]
    fn out_of_range_records_are_excluded() {
        let records = vec![
            article("Too early", Some((2024, 1, 1, 8))),
            article("In range", Some((2024, 2, 15, 8))),
            article("Too late", Some((2024, 4, 1, 8))),
        ];
        let filtered = filter_records(
            records,
            &date_options(Some((2024, 2, 1)), Some((2024, 3, 1))),
        );
        assert_eq!(vec!["In range".to_string()], titles(&filtered));
    }

    #[test]
    fn record_without_date_passes_any_bounds() {
        let records = vec![
            article("No parseable date", None),
            vulnerability("CVE-2024-0003", "no dateAdded", None),
        ];
        let filtered = filter_records(
            records,
            &date_options(Some((2030, 1, 1)), Some((2030, 12, 31))),
        );
        assert_eq!(2, filtered.len());
    }

    #[test]
    fn predicates_are_anded() {
        let records = vec![
            article("Log4j in range", Some((2024, 2, 10, 9))),
            article("Log4j out of range", Some((2023, 2, 10, 9))),
            article("In range but off topic", Some((2024, 2, 10, 9))),
        ];
        let options = FilterOptions {
            keyword: Some("log4j".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
        };
        let filtered = filter_records(records, &options);
        assert_eq!(vec!["Log4j in range".to_string()], titles(&filtered));
    }

    #[test]
    fn pages_concatenate_to_the_filtered_list() {
        let records: Vec<FeedRecord> =
            (0..25).map(|i| article(&format!("Article {:02}", i), None)).collect();
        let expected = titles(&records);
        let paginator = Paginator::new(records, DEFAULT_PAGE_SIZE);
        assert_eq!(3, paginator.total_pages());

        let writer = RecordingWriter::new();
        let mut gate = CountingGate::new(PageDecision::Continue);
        paginator.serve(&writer, &mut gate);

        let pages = writer.pages.borrow();
        assert_eq!(3, pages.len());
        assert_eq!(10, pages[0].len());
        assert_eq!(10, pages[1].len());
        assert_eq!(5, pages[2].len());
        let concatenated: Vec<String> = pages.iter().flatten().cloned().collect();
        assert_eq!(expected, concatenated);
        // Consulted between pages only: twice for three pages
        assert_eq!(2, gate.consulted);
    }

    #[test]
    fn stopping_gate_cuts_the_remaining_pages() {
        let records: Vec<FeedRecord> =
            (0..25).map(|i| article(&format!("Article {:02}", i), None)).collect();
        let paginator = Paginator::new(records, DEFAULT_PAGE_SIZE);

        let writer = RecordingWriter::new();
        let mut gate = CountingGate::new(PageDecision::Stop);
        paginator.serve(&writer, &mut gate);

        assert_eq!(1, writer.pages.borrow().len());
        assert_eq!(1, gate.consulted);
    }

    #[test]
    fn single_page_never_consults_the_gate() {
        let records: Vec<FeedRecord> =
            (0..4).map(|i| article(&format!("Article {}", i), None)).collect();
        let paginator = Paginator::new(records, DEFAULT_PAGE_SIZE);

        let writer = RecordingWriter::new();
        let mut gate = CountingGate::new(PageDecision::Stop);
        paginator.serve(&writer, &mut gate);

        assert_eq!(1, writer.pages.borrow().len());
        assert_eq!(0, gate.consulted);
    }

    #[test]
    fn zero_matches_render_no_pages() {
        let records = vec![article("Nothing to see", None)];
        let filtered = filter_records(records, &keyword_options("keyword-not-present"));
        let paginator = Paginator::new(filtered, DEFAULT_PAGE_SIZE);
        assert_eq!(0, paginator.total_pages());

        let writer = RecordingWriter::new();
        let mut gate = CountingGate::new(PageDecision::Continue);
        paginator.serve(&writer, &mut gate);

        assert!(writer.pages.borrow().is_empty());
        assert_eq!(0, gate.consulted);
    }
}
