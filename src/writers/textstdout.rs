//! Write the [`FeedRecord`]s to standard output
//! It is the only writer, it presents the records in a text format and
//! prints them on STDOUT. It also hosts the interactive pagination gate.

use std::io::{self, BufRead, Write as IoWrite};

use colored::Colorize;
use log::trace;

use super::Writer;
use crate::engine::{PageDecision, PageGate};
use crate::models::{Category, FeedRecord};

/// A writer to print the records in the terminal.
pub struct TextStdoutWriter {
    /// Whether to display the description of each record
    verbose: bool,
}

impl TextStdoutWriter {
    /// Creates a new TextStdoutWriter
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Writer for TextStdoutWriter {
    /// Prints the banner of one source, colored by category
    fn write_banner(&self, category: Category, source_name: &str, keyword: Option<&str>) {
        let text = match keyword {
            Some(keyword) => format!(
                "Results from {} source '{}' with the keyword '{}':",
                category.label(),
                source_name,
                keyword
            ),
            None => format!("Results from {} source '{}':", category.label(), source_name),
        };
        let colored_text = match category {
            Category::News => text.blue(),
            Category::Cve => text.red(),
            Category::Leak => text.green(),
            Category::Ransom => text.yellow(),
        };
        println!("{}", colored_text);
    }

    /// Prints the records of one page on STDOUT
    fn write_page(&self, records: &[FeedRecord]) {
        trace!("Running TextStdoutWriter::write_page()");
        for record in records {
            match record {
                FeedRecord::Article(article) => {
                    println!("Title: {}", article.title);
                    if self.verbose {
                        println!("Description: {}", article.description);
                    }
                    println!("Author: {}", article.author);
                    println!("Date: {}", article.date_text);
                    println!("Link: {}", article.link);
                    println!();
                }
                FeedRecord::Vulnerability(vulnerability) => {
                    println!("CVE ID: {}", vulnerability.cve_id);
                    println!("Vulnerability Name: {}", vulnerability.name);
                    // An absent date is displayed empty, the record is
                    // still worth showing
                    let date_added = vulnerability
                        .date_added
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    println!("Date Added: {}", date_added);
                    if self.verbose {
                        println!("Description: {}", vulnerability.description);
                    }
                    println!();
                }
            }
        }
    }
}

/// The interactive pagination gate.
/// It blocks on one line of console input between pages. Only an input
/// of exactly one space continues, anything else (including an empty
/// line) stops the paging of the current source.
pub struct ConsolePageGate;

impl ConsolePageGate {
    /// Creates a new ConsolePageGate
    pub fn new() -> Self {
        ConsolePageGate
    }

    /// Decides from one line of input, shared with the tests
    fn decide(line: &str) -> PageDecision {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.to_lowercase() == " " {
            PageDecision::Continue
        } else {
            PageDecision::Stop
        }
    }
}

impl PageGate for ConsolePageGate {
    /// Prompts the user and reads one line on STDIN
    fn next_page(&mut self) -> PageDecision {
        print!("Press <Space> then <Enter> to view the next page: ");
        if io::stdout().flush().is_err() {
            return PageDecision::Stop;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return PageDecision::Stop;
        }
        Self::decide(&line)
    }
}
