//! The categories and their source tables.
//! A source table is the ordered list of named feed URLs queried for a
//! category. The tables are built once at startup and passed explicitly
//! to the application, they are never mutated.

use clap::{builder::PossibleValue, ValueEnum};
use log::trace;

/// Represents a category of feeds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Category {
    /// Cybersecurity news and vendor research blogs
    News,
    /// Known exploited vulnerabilities (JSON catalog)
    Cve,
    /// Data leak disclosures
    Leak,
    /// Ransomware trackers
    Ransom,
}

impl ValueEnum for Category {
    /// Lists the variants available for clap
    fn value_variants<'a>() -> &'a [Self] {
        &[Category::News, Category::Cve, Category::Leak, Category::Ransom]
    }

    /// Map each value to a possible value in clap
    fn to_possible_value(&self) -> Option<PossibleValue> {
        match &self {
            Category::News => Some(PossibleValue::new("news")),
            Category::Cve => Some(PossibleValue::new("cve")),
            Category::Leak => Some(PossibleValue::new("leak")),
            Category::Ransom => Some(PossibleValue::new("ransom")),
        }
    }
}

impl Category {
    /// The label used in the per-source banner
    pub fn label(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Cve => "CVE",
            Category::Leak => "leak",
            Category::Ransom => "ransom",
        }
    }
}

/// A named feed URL within a category table
pub struct Source {
    /// The human-readable name of the source
    pub name: String,
    /// The URL of the feed
    pub url: String,
}

/// The ordered list of sources queried for one category
pub struct SourceTable {
    /// The category the table belongs to
    category: Category,
    /// The sources, in the order they are queried
    sources: Vec<Source>,
}

impl SourceTable {
    /// Builds the table of the given category
    pub fn for_category(category: Category) -> Self {
        trace!("Running SourceTable::for_category()");
        match category {
            Category::News => Self::news(),
            Category::Cve => Self::cve(),
            Category::Leak => Self::leak(),
            Category::Ransom => Self::ransom(),
        }
    }

    /// The category the table belongs to
    pub fn category(&self) -> Category {
        self.category
    }

    /// The sources of the table, in query order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    fn from_pairs(category: Category, pairs: &[(&str, &str)]) -> Self {
        let sources = pairs
            .iter()
            .map(|(name, url)| Source {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect();
        SourceTable { category, sources }
    }

    /// News and vendor research blogs
    fn news() -> Self {
        Self::from_pairs(
            Category::News,
            &[
                ("TheHackerNews", "https://feeds.feedburner.com/TheHackersNews"),
                ("Sentinelone", "https://fr.sentinelone.com/blog/feed/"),
                ("Threatpost", "https://threatpost.com/feed"),
                ("KrebsOnSecurity", "https://krebsonsecurity.com/feed/"),
                ("Talos", "https://blog.talosintelligence.com/rss/"),
                ("Securelist", "https://securelist.com/feed/"),
                (
                    "Microsoft",
                    "https://www.microsoft.com/en-us/security/blog/feed/",
                ),
                (
                    "Microsoftthreathunting",
                    "https://msrc.microsoft.com/blog/categories/microsoft-threat-hunting/feed",
                ),
                ("Itguru", "https://www.itsecurityguru.org/feed/"),
                ("Amazon", "https://aws.amazon.com/fr/blogs/security/feed/"),
                (
                    "Sophos",
                    "https://news.sophos.com/en-us/category/threat-research/feed/",
                ),
                ("GrahamCluley", "https://grahamcluley.com/feed/"),
                ("Decoded", "https://decoded.avast.io/feed/"),
                (
                    "Dataprivacy",
                    "https://www.dataprivacyandsecurityinsider.com/feed/",
                ),
                ("SecurityBoulevard", "https://securityboulevard.com/feed/"),
                ("Socprime", "https://socprime.com/blog/feed/"),
                ("Intel471", "https://intel471.com/blog/feed/"),
                (
                    "Crowdstrike",
                    "https://www.crowdstrike.com/blog/category/threat-intel-research/feed/",
                ),
                ("Hackread", "https://www.hackread.com/feed/"),
                (
                    "Infoblox",
                    "https://blogs.infoblox.com/category/cyber-threat-intelligence/feed/",
                ),
                ("Zerofox", "https://www.zerofox.com/blog/feed/"),
                ("Ransomware", "https://ransomware.org/feed/"),
                ("Helpnetsecurity", "https://www.helpnetsecurity.com/feed/"),
                ("Coveware", "https://www.coveware.com/blog?format=RSS"),
                ("BleepingComputer", "https://www.bleepingcomputer.com/feed/"),
                ("Thedefirreport", "https://thedfirreport.com/feed/"),
            ],
        )
    }

    /// Known exploited vulnerabilities catalogs
    fn cve() -> Self {
        Self::from_pairs(
            Category::Cve,
            &[(
                "Cisa",
                "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json",
            )],
        )
    }

    /// Data leak disclosure feeds
    fn leak() -> Self {
        Self::from_pairs(
            Category::Leak,
            &[
                ("Leak-lookup", "https://leak-lookup.com/rss"),
                ("Data-breaches", "https://www.databreaches.net/feed/"),
            ],
        )
    }

    /// Ransomware tracker feeds
    fn ransom() -> Self {
        Self::from_pairs(
            Category::Ransom,
            &[
                ("Ransomwarelive", "https://ransomware.live/rss.xml"),
                ("Redpacket", "https://www.redpacketsecurity.com/feed/"),
                ("Ransomlookup", "https://www.ransomlook.io/rss.xml"),
            ],
        )
    }
}
