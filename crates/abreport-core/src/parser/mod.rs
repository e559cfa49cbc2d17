//! Streaming parser for ApacheBench textual reports.
//!
//! A report is scanned line by line. Each line is classified into one of a
//! small set of shapes ([`line::classify`]) and recognized lines update a
//! single [`Report`] record; everything else is skipped. Values that match a
//! known shape but fail numeric conversion produce warnings and zero
//! defaults rather than errors, so a truncated or partly garbled report
//! still yields a usable record.

pub mod line;
pub mod scrub;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::AbReportError;
use crate::report::{ConnectionTimeStats, Report};

use line::LineShape;

// ---------------------------------------------------------------------------
// ParseOutcome
// ---------------------------------------------------------------------------

/// The parsed record plus per-run diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub report: Report,
    /// One entry per value that could not be applied; the matching record
    /// field keeps its zero default. Each entry is also emitted through
    /// `tracing` at warn level as it occurs.
    pub warnings: Vec<String>,
    /// Total lines scanned, recognized or not.
    pub lines_scanned: usize,
    /// Lines that matched a known shape and were accepted by the dispatch.
    /// A falling recognized/scanned ratio across `ab` versions is the first
    /// sign of format drift.
    pub lines_recognized: usize,
}

// ---------------------------------------------------------------------------
// ReportParser
// ---------------------------------------------------------------------------

/// Incremental report parser.
///
/// Feed lines as they arrive with [`feed_line`](Self::feed_line), then take
/// the result with [`finish`](Self::finish). The convenience entry points
/// [`parse_report`], [`parse_report_str`], and [`parse_report_file`] wrap
/// this for whole inputs.
#[derive(Debug, Default)]
pub struct ReportParser {
    report: Report,
    warnings: Vec<String>,
    lines_scanned: usize,
    lines_recognized: usize,
}

impl ReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line and apply it to the record under construction.
    pub fn feed_line(&mut self, text: &str) {
        self.lines_scanned += 1;
        let recognized = match line::classify(text) {
            LineShape::Banner { version, revision } => {
                self.apply_banner(version, revision);
                true
            }
            LineShape::KeyValue { key, value } => self.apply_key_value(key, value),
            LineShape::Percentile { percent, value } => self.apply_percentile(percent, value),
            LineShape::Unmatched => false,
        };
        if recognized {
            self.lines_recognized += 1;
        } else {
            tracing::debug!("skipped report line: {text:?}");
        }
    }

    /// Consume the parser and return the record with its diagnostics.
    pub fn finish(self) -> ParseOutcome {
        ParseOutcome {
            report: self.report,
            warnings: self.warnings,
            lines_scanned: self.lines_scanned,
            lines_recognized: self.lines_recognized,
        }
    }

    fn apply_banner(&mut self, version: &str, revision: &str) {
        match version.parse() {
            Ok(v) => self.report.version = v,
            Err(err) => self.warn(format!("banner version {version:?}: {err}")),
        }
        match revision.parse() {
            Ok(r) => self.report.revision = r,
            Err(err) => self.warn(format!("banner revision {revision:?}: {err}")),
        }
    }

    /// Apply a `label: value` line. Returns false for labels the parser does
    /// not know, which are skipped without diagnostics.
    fn apply_key_value(&mut self, key: &str, value: &str) -> bool {
        match key {
            "Server Software" => self.report.server_software = value.to_string(),
            "Server Hostname" => self.report.hostname = value.to_string(),
            "Server Port" => self.report.port = self.scrub_field(key, value),
            "Document Path" => self.report.path = value.to_string(),
            "Document Length" => self.report.body_size_bytes = self.scrub_field(key, value),
            "Concurrency Level" => self.report.concurrency = self.scrub_field(key, value),
            "Time taken for tests" => self.report.test_duration_secs = self.scrub_field(key, value),
            "Complete requests" => self.report.completed_requests = self.scrub_field(key, value),
            "Failed requests" => self.report.failed_requests = self.scrub_field(key, value),
            "Total transferred" => {
                self.report.total_transferred_bytes = self.scrub_field(key, value)
            }
            "HTML transferred" => self.report.body_transferred_bytes = self.scrub_field(key, value),
            "Requests per second" => self.report.requests_per_second = self.scrub_field(key, value),
            "Time per request" => self.apply_time_per_request(value),
            "Transfer rate" => self.report.transfer_rate = self.scrub_field(key, value),
            "Connect" => self.report.connection_times.connect = self.connection_row(key, value),
            "Processing" => {
                self.report.connection_times.processing = self.connection_row(key, value)
            }
            "Waiting" => self.report.connection_times.waiting = self.connection_row(key, value),
            "Total" => self.report.connection_times.total = self.connection_row(key, value),
            _ => return false,
        }
        true
    }

    /// `Time per request` appears twice in a report: the per-request mean
    /// (trailing text exactly ` [ms] (mean)`) and the figure averaged across
    /// all concurrent requests. Only the per-request mean is stored; the
    /// other variant is discarded without a diagnostic.
    fn apply_time_per_request(&mut self, value: &str) {
        match scrub::split_value(value) {
            Ok((token, " [ms] (mean)")) => match token.parse() {
                Ok(ms) => self.report.mean_response_ms = ms,
                Err(err) => {
                    self.warn(format!("Time per request: {token:?}: {err}"));
                    self.report.mean_response_ms = 0.0;
                }
            },
            Ok(_) => {}
            Err(err) => self.warn(format!("Time per request: {err}")),
        }
    }

    /// Parse a five-number connection-time row (`min mean [+/-sd] median
    /// max`). A malformed row leaves the phase unset.
    fn connection_row(&mut self, key: &str, value: &str) -> Option<ConnectionTimeStats> {
        match scrub::scrub_stats_row(value) {
            Some([min, mean, std_dev, median, max]) => Some(ConnectionTimeStats {
                min_ms: min,
                mean_ms: mean,
                std_dev_ms: std_dev,
                median_ms: median,
                max_ms: max,
            }),
            None => {
                self.warn(format!("{key}: expected five numeric columns in {value:?}"));
                None
            }
        }
    }

    /// Record one percentile table row. Percentile 0 is never stored, and
    /// percents outside 1 through 100 are dropped with a warning.
    fn apply_percentile(&mut self, percent: &str, value: &str) -> bool {
        let pct: u8 = match percent.parse() {
            Ok(p) => p,
            Err(err) => {
                self.warn(format!("percentile {percent:?}: {err}"));
                return false;
            }
        };
        if pct == 0 {
            return true;
        }
        if pct > 100 {
            self.warn(format!("percentile {pct} out of range"));
            return false;
        }
        match scrub::scrub_number(value) {
            Ok(ms) => {
                self.report.percentiles.insert(pct, ms);
            }
            Err(err) => {
                self.warn(format!("percentile {pct}: {err}"));
                self.report.percentiles.insert(pct, 0.0);
            }
        }
        true
    }

    /// Scrub a numeric field value, substituting the type's zero and
    /// recording a warning when the value cannot be parsed.
    fn scrub_field<T>(&mut self, key: &str, value: &str) -> T
    where
        T: FromStr + Default,
        T::Err: std::fmt::Display,
    {
        match scrub::scrub_number(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.warn(format!("{key}: {err}"));
                T::default()
            }
        }
    }

    /// Record a tolerated parse problem, mirrored to the `tracing`
    /// subscriber.
    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse a complete report from a buffered reader.
///
/// A read error stops the scan with a warning; everything parsed up to that
/// point is still returned.
pub fn parse_report<R: BufRead>(reader: R) -> ParseOutcome {
    let mut parser = ReportParser::new();
    for text in reader.lines() {
        match text {
            Ok(text) => parser.feed_line(&text),
            Err(err) => {
                parser.warn(format!("read error, stopping scan: {err}"));
                break;
            }
        }
    }
    parser.finish()
}

/// Parse a report held in memory.
pub fn parse_report_str(text: &str) -> ParseOutcome {
    let mut parser = ReportParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parse a report file from disk.
pub fn parse_report_file(path: impl AsRef<Path>) -> Result<ParseOutcome, AbReportError> {
    let file = File::open(path.as_ref())?;
    Ok(parse_report(BufReader::new(file)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
