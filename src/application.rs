//! This module contains the main structure and logic for the whole
//! application.

use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use log::{debug, error, info, trace};

use crate::engine::{filter_records, FilterOptions, Paginator, DEFAULT_PAGE_SIZE};
use crate::feeds::syndication::SyndicationAdapter;
use crate::feeds::vulnerability::VulnerabilityJsonAdapter;
use crate::feeds::FeedAdapter;
use crate::models::{Category, Source, SourceTable};
use crate::readers::http::HttpReader;
use crate::writers::textstdout::{ConsolePageGate, TextStdoutWriter};
use crate::writers::Writer;

/// The banner printed at startup
const BANNER: &str = r#"
    _    ____  ___  ____      _
   / \  / ___|/ _ \|  _ \    / \
  / _ \| |  _| | | | |_) |  / _ \
 / ___ \ |_| | |_| |  _ <  / ___ \
/_/   \_\____|\___/|_| \_\/_/   \_\
"#;

/// The format of the --start-date and --end-date bounds
const BOUND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents the application
pub struct Application {
    /// The adapter used for the syndication categories
    syndication: SyndicationAdapter,
    /// The adapter used for the cve category
    vulnerability: VulnerabilityJsonAdapter,
    /// The arguments given on the command line.
    argv: Option<Args>,
    /// The filter options, built from argv.
    options: Option<FilterOptions>,
}

impl Application {
    /// Creates a new application
    pub fn new() -> Self {
        trace!("In Application::new()");
        Application {
            syndication: SyndicationAdapter::new(),
            vulnerability: VulnerabilityJsonAdapter::new(),
            argv: None,
            options: None,
        }
    }

    /// Read argv to get the arguments before running the application
    /// A malformed date bound is a fatal input error: a clean message is
    /// printed and the process exits non-zero, before any source is
    /// queried.
    pub fn read_argv(&mut self) {
        trace!("In Application::read_argv()");
        let args = Args::parse();

        let start_date = Self::parse_bound("--start-date", args.start_date.as_deref());
        let end_date = Self::parse_bound("--end-date", args.end_date.as_deref());
        // An empty keyword filters nothing, same as no keyword at all
        let keyword = args.keyword.clone().filter(|keyword| !keyword.is_empty());
        debug!(
            "Filters: keyword = {:?}, start_date = {:?}, end_date = {:?}",
            keyword, start_date, end_date
        );

        self.options = Some(FilterOptions {
            keyword,
            start_date,
            end_date,
        });
        self.argv = Some(args);
    }

    /// Parses one of the date bounds, exiting on a malformed value
    fn parse_bound(flag: &str, raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?;
        match parse_date_argument(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                error!("Invalid value for {}: {}", flag, e);
                println!("Invalid value for {}: {}", flag, e);
                std::process::exit(1);
            }
        }
    }

    /// Runs the global application
    /// read_argv() MUST have been called before
    pub fn run(&self) {
        trace!("Running Application::run()");
        let args = self
            .argv
            .as_ref()
            .expect("CLI arguments haven't been read.");
        let options = self
            .options
            .as_ref()
            .expect("CLI arguments haven't been read.");

        println!("{}", BANNER);
        let Some(category) = args.category else {
            // Without a category there is nothing to fetch, show the
            // usage and stop there
            Args::command().print_help().ok();
            println!();
            return;
        };

        info!("Selected category: {:?}", category);
        let table = SourceTable::for_category(category);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Unable to create the tokio runtime.");
        let reader = HttpReader::new();
        let writer = TextStdoutWriter::new(args.verbose);
        let mut gate = ConsolePageGate::new();

        // One source at a time: fetched, filtered and paged to
        // completion before the next one starts
        for source in table.sources() {
            writer.write_banner(category, &source.name, options.keyword.as_deref());
            let result = self.process_source(
                &runtime,
                &reader,
                source,
                category,
                options,
                args.page_size,
                &writer,
                &mut gate,
            );
            if let Err(e) = result {
                // A failing source doesn't stop the run
                error!("Source {} failed: {}", source.name, e);
                println!("An error occurred: {}", e);
            }
            println!();
        }
    }

    /// Fetches, normalizes, filters and pages a single source.
    /// Any error is returned to the caller, which reports it and moves
    /// on to the next source.
    fn process_source(
        &self,
        runtime: &tokio::runtime::Runtime,
        reader: &HttpReader,
        source: &Source,
        category: Category,
        options: &FilterOptions,
        page_size: usize,
        writer: &TextStdoutWriter,
        gate: &mut ConsolePageGate,
    ) -> Result<(), String> {
        debug!("Processing source {} ({})", source.name, source.url);
        let body = runtime.block_on(reader.read_page(&source.url))?;

        let adapter: &dyn FeedAdapter = match category {
            Category::Cve => &self.vulnerability,
            _ => &self.syndication,
        };
        let records = adapter.normalize(&body)?;
        let filtered = filter_records(records, options);

        Paginator::new(filtered, page_size).serve(writer, gate);
        Ok(())
    }
}

/// Parses a YYYY-MM-DD date argument
fn parse_date_argument(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, BOUND_DATE_FORMAT)
        .map_err(|e| format!("{:?} is not a valid YYYY-MM-DD date ({})", raw, e))
}

/// Represents the CLI arguments accepted by Agora
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The category of feeds to query
    #[arg(long = "argument", value_name = "CATEGORY")]
    pub category: Option<Category>,
    /// Keep only the entries containing this keyword (case-insensitive)
    #[arg(short, long, value_name = "KEYWORD")]
    pub keyword: Option<String>,
    /// Keep only the entries published on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,
    /// Keep only the entries published on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,
    /// Also display the description of each entry
    #[arg(short, long)]
    pub verbose: bool,
    /// The number of entries displayed per page
    #[arg(short, long, value_name = "PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date_argument_parses() {
        let date = parse_date_argument("2024-03-01").unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), date);
    }

    #[test]
    fn malformed_date_argument_is_rejected() {
        assert!(parse_date_argument("01/03/2024").is_err());
        assert!(parse_date_argument("2024-13-01").is_err());
        assert!(parse_date_argument("tomorrow").is_err());
    }
}
