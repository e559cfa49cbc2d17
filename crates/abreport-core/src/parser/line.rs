//! Line classification for `ab` report text.

use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns for the line shapes an `ab` report contains.
static PATTERNS: LazyLock<ReportPatterns> = LazyLock::new(ReportPatterns::new);

struct ReportPatterns {
    /// `This is ApacheBench, Version 2.3 <$Revision: 1826891 $>`
    banner: Regex,
    /// `Server Hostname:        localhost`, and the connection-time rows.
    key_value: Regex,
    /// `  50%      1`
    percentile: Regex,
}

impl ReportPatterns {
    fn new() -> Self {
        Self {
            banner: Regex::new(r"^This is ApacheBench, Version ([0-9.]+) <\$Revision: (\d+) \$>")
                .expect("static regex must compile"),
            key_value: Regex::new(r"([\w ]+):\s+(\S+.*)").expect("static regex must compile"),
            percentile: Regex::new(r"^\s*(\d+)%\s+(.*)").expect("static regex must compile"),
        }
    }
}

// ---------------------------------------------------------------------------
// LineShape
// ---------------------------------------------------------------------------

/// A single report line, classified by shape.
///
/// Classification tries each pattern in a fixed order and takes the first
/// match; lines matching none are [`LineShape::Unmatched`] and carry no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// The opening banner with the tool version and source revision.
    Banner { version: &'a str, revision: &'a str },
    /// A `label: value` summary line. The value starts at its first
    /// non-whitespace character; labels with nothing after the colon do not
    /// match this shape at all.
    KeyValue { key: &'a str, value: &'a str },
    /// A row of the "Percentage of the requests served" table.
    Percentile { percent: &'a str, value: &'a str },
    /// Anything else: blank lines, copyright text, table headings.
    Unmatched,
}

/// Classify one report line. The banner is tried first so that the
/// `$Revision:` text inside it is not mistaken for a key/value pair, then
/// key/value, then percentile.
pub fn classify(line: &str) -> LineShape<'_> {
    if let Some(caps) = PATTERNS.banner.captures(line) {
        return LineShape::Banner {
            version: caps.get(1).map_or("", |m| m.as_str()),
            revision: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = PATTERNS.key_value.captures(line) {
        return LineShape::KeyValue {
            key: caps.get(1).map_or("", |m| m.as_str()),
            value: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = PATTERNS.percentile.captures(line) {
        return LineShape::Percentile {
            percent: caps.get(1).map_or("", |m| m.as_str()),
            value: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    LineShape::Unmatched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
