use crate::classifier::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Usage counters persisted across runs: how many sites were analyzed,
/// how many dangerous verdicts were raised, and the reporting volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub sites_analyzed: u64,
    pub threats_blocked: u64,
    pub false_positives: u64,
    pub reports_submitted: u64,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Default for Stats {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            sites_analyzed: 0,
            threats_blocked: 0,
            false_positives: 0,
            reports_submitted: 0,
            start_time: now,
            last_updated: now,
        }
    }
}

/// JSON-file backed statistics store. Callers record each verdict as
/// it is produced and flush on their own schedule; the classifier
/// itself never writes here.
pub struct StatisticsCollector {
    path: String,
    stats: Stats,
}

impl StatisticsCollector {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let stats = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Stats::default()
        };
        Ok(Self {
            path: path.to_string(),
            stats,
        })
    }

    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.stats.sites_analyzed += 1;
        if verdict == Verdict::Dangerous {
            self.stats.threats_blocked += 1;
        }
        self.stats.last_updated = Utc::now();
    }

    pub fn record_false_positive(&mut self) {
        self.stats.false_positives += 1;
        self.stats.reports_submitted += 1;
        self.stats.last_updated = Utc::now();
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn reset(&mut self) {
        self.stats = Stats::default();
    }

    pub fn flush(&self) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.stats)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
