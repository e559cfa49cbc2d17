pub mod export;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ConnectionTimeStats
// ---------------------------------------------------------------------------

/// One row of the "Connection Times (ms)" table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConnectionTimeStats {
    pub min_ms: f64,
    pub mean_ms: f64,
    /// Standard deviation around the mean, printed as `[+/-sd]`.
    pub std_dev_ms: f64,
    pub median_ms: f64,
    pub max_ms: f64,
}

// ---------------------------------------------------------------------------
// ConnectionTimes
// ---------------------------------------------------------------------------

/// Per-phase connection time statistics.
///
/// A phase stays `None` until a well-formed five-number row for it has been
/// seen; a report truncated before the table leaves all four unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConnectionTimes {
    pub connect: Option<ConnectionTimeStats>,
    pub processing: Option<ConnectionTimeStats>,
    pub waiting: Option<ConnectionTimeStats>,
    pub total: Option<ConnectionTimeStats>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Structured record of one ApacheBench run, built line by line from the
/// textual report.
///
/// Every field starts at its zero value and is filled in as the matching
/// line is encountered; fields whose lines never appear keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Report {
    /// ApacheBench version from the opening banner (e.g. 2.3).
    pub version: f64,
    /// Source revision from the opening banner.
    pub revision: u64,
    pub server_software: String,
    pub hostname: String,
    pub port: u16,
    pub path: String,
    /// Response body size of a single document (bytes).
    pub body_size_bytes: u64,
    pub concurrency: u32,
    /// Wall-clock duration of the whole run (seconds).
    pub test_duration_secs: f64,
    pub completed_requests: u64,
    pub failed_requests: u64,
    /// Total bytes received, headers included.
    pub total_transferred_bytes: u64,
    /// Total body bytes received.
    pub body_transferred_bytes: u64,
    /// Mean throughput (requests per second).
    pub requests_per_second: f64,
    /// Mean time per request (ms). This is the per-request figure, not the
    /// across-all-concurrent-requests one.
    pub mean_response_ms: f64,
    /// Receive bandwidth (Kbytes per second).
    pub transfer_rate: f64,
    pub connection_times: ConnectionTimes,
    /// Latency distribution: percentile (1 through 100) to response time (ms).
    pub percentiles: BTreeMap<u8, f64>,
}

impl Report {
    /// Response time at the given percentile, or 0 when the report had no
    /// line for it.
    pub fn percentile(&self, pct: u8) -> f64 {
        self.percentiles.get(&pct).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_is_all_zeroes() {
        let report = Report::default();
        assert_eq!(report.hostname, "");
        assert_eq!(report.port, 0);
        assert_eq!(report.completed_requests, 0);
        assert_eq!(report.requests_per_second, 0.0);
        assert!(report.connection_times.connect.is_none());
        assert!(report.percentiles.is_empty());
    }

    #[test]
    fn percentile_lookup_returns_stored_value() {
        let mut report = Report::default();
        report.percentiles.insert(50, 1.0);
        report.percentiles.insert(100, 6.0);
        assert_eq!(report.percentile(50), 1.0);
        assert_eq!(report.percentile(100), 6.0);
    }

    #[test]
    fn percentile_lookup_defaults_to_zero() {
        let report = Report::default();
        assert_eq!(report.percentile(99), 0.0);
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = Report {
            version: 2.3,
            revision: 1826891,
            hostname: "localhost".to_string(),
            port: 6060,
            path: "/".to_string(),
            concurrency: 2,
            requests_per_second: 918.11,
            ..Report::default()
        };
        report.percentiles.insert(50, 1.0);
        report.connection_times.connect = Some(ConnectionTimeStats {
            min_ms: 0.0,
            mean_ms: 0.0,
            std_dev_ms: 0.0,
            median_ms: 0.0,
            max_ms: 0.0,
        });

        let json = serde_json::to_string(&report).expect("serialize should succeed");
        let loaded: Report = serde_json::from_str(&json).expect("deserialize should succeed");

        assert_eq!(loaded.hostname, report.hostname);
        assert_eq!(loaded.port, report.port);
        assert_eq!(loaded.revision, report.revision);
        assert!((loaded.requests_per_second - 918.11).abs() < 0.001);
        assert_eq!(loaded.percentile(50), 1.0);
        assert!(loaded.connection_times.connect.is_some());
        assert!(loaded.connection_times.total.is_none());
    }

    #[test]
    fn percentile_keys_serialize_in_ascending_order() {
        let mut report = Report::default();
        report.percentiles.insert(100, 6.0);
        report.percentiles.insert(50, 1.0);
        report.percentiles.insert(90, 6.0);
        let json = serde_json::to_string(&report).expect("serialize should succeed");
        let p50 = json.find("\"50\"").expect("50 should be present");
        let p90 = json.find("\"90\"").expect("90 should be present");
        let p100 = json.find("\"100\"").expect("100 should be present");
        assert!(p50 < p90 && p90 < p100);
    }
}
