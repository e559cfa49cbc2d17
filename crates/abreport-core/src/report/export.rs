use super::Report;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Column header matching the field order of [`csv_row`].
pub fn csv_header() -> &'static str {
    "Name,Server,Hostname,Port,Path,Concurrency,Throughput,Avg. Latency,\
     Duration,Successful,Failed,Max. latency,50% Latency,90% Latency,\
     95% Latency,98% Latency,99% Latency,Avg. Recv. Bandwidth"
}

/// Render a report as a single CSV data row.
///
/// `name` is the caller-chosen label for the run, placed in the first
/// column. Percentiles the report did not contain render as `0`. Fields are
/// joined verbatim: embedded commas or quotes in the name, server, or path
/// are not escaped.
pub fn csv_row(report: &Report, name: &str) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        name,
        report.server_software,
        report.hostname,
        report.port,
        report.path,
        report.concurrency,
        report.requests_per_second,
        report.mean_response_ms,
        report.test_duration_secs,
        report.completed_requests,
        report.failed_requests,
        report.percentile(100),
        report.percentile(50),
        report.percentile(90),
        report.percentile(95),
        report.percentile(98),
        report.percentile(99),
        report.transfer_rate,
    )
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export the full parsed report as pretty-printed JSON.
///
/// Carries everything the CSV row drops: the banner version and revision,
/// the per-phase connection times, and the whole percentile map.
pub fn export_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
