use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_REPORTS: usize = 100;
const RETENTION_DAYS: i64 = 30;

/// A user-submitted false-positive report. The domain is stored only
/// as an anonymizing hash; the plain name never leaves the machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalsePositiveReport {
    pub domain_hash: String,
    pub report_id: String,
    pub timestamp: DateTime<Utc>,
    pub verdict: String,
    pub reasons: Vec<String>,
}

/// JSON-file backed report store, capped at the most recent
/// `MAX_REPORTS` entries with a 30-day retention window.
pub struct ReportStore {
    path: String,
    reports: Vec<FalsePositiveReport>,
}

impl ReportStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let reports = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path: path.to_string(),
            reports,
        })
    }

    pub fn submit(&mut self, domain: &str, verdict: &str, reasons: &[String]) -> String {
        let report = FalsePositiveReport {
            domain_hash: hash_domain(domain),
            report_id: generate_report_id(),
            timestamp: Utc::now(),
            verdict: verdict.to_string(),
            reasons: reasons.to_vec(),
        };
        let id = report.report_id.clone();
        log::info!("False positive report {} recorded", id);

        self.reports.push(report);
        if self.reports.len() > MAX_REPORTS {
            let excess = self.reports.len() - MAX_REPORTS;
            self.reports.drain(..excess);
        }
        id
    }

    /// Drop reports older than the retention window. Returns the number
    /// of purged entries.
    pub fn cleanup_old(&mut self) -> usize {
        let cutoff = Utc::now() - Duration::days(RETENTION_DAYS);
        let before = self.reports.len();
        self.reports.retain(|report| report.timestamp > cutoff);
        before - self.reports.len()
    }

    pub fn reports(&self) -> &[FalsePositiveReport] {
        &self.reports
    }

    pub fn flush(&self) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.reports)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// 32-bit rolling hash rendered in base 36, compatible with the hashes
/// already collected by deployed clients.
pub fn hash_domain(domain: &str) -> String {
    let mut hash: i32 = 0;
    for c in domain.chars() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    to_base36(hash)
}

fn to_base36(value: i32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let negative = value < 0;
    let mut n = (value as i64).unsigned_abs();
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    if negative {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

fn generate_report_id() -> String {
    // Millisecond timestamp in base 36 plus a per-process counter,
    // unique enough for a local report log.
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let millis = Utc::now().timestamp_millis();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", to_base36(millis as i32), to_base36(seq as i32))
}
