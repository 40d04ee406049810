use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Per-user settings: the whitelist consulted by the classifier plus
/// the presentation toggles consumed by the warning layer. Persisted
/// as JSON next to the statistics store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub protection_level: ProtectionLevel,
    pub user_whitelist: Vec<String>,
    pub notifications_enabled: bool,
    pub reporting_enabled: bool,
    pub install_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    Relaxed,
    Normal,
    Strict,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            protection_level: ProtectionLevel::Normal,
            user_whitelist: Vec::new(),
            notifications_enabled: true,
            reporting_enabled: true,
            install_date: Utc::now(),
        }
    }
}

impl UserSettings {
    /// Load settings, falling back to defaults when the file does not
    /// exist yet (first run).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            log::debug!("No settings file at {path}, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: UserSettings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whitelist snapshot in the form the classifier consumes.
    pub fn whitelist_snapshot(&self) -> HashSet<String> {
        self.user_whitelist
            .iter()
            .map(|d| d.to_lowercase())
            .collect()
    }

    /// Add a domain to the whitelist; returns false if already present.
    pub fn whitelist_add(&mut self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        if self.user_whitelist.contains(&domain) {
            return false;
        }
        self.user_whitelist.push(domain);
        true
    }

    pub fn whitelist_remove(&mut self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        let before = self.user_whitelist.len();
        self.user_whitelist.retain(|d| d != &domain);
        self.user_whitelist.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_add_and_remove() {
        let mut settings = UserSettings::default();
        assert!(settings.whitelist_add("My-Intranet.example"));
        assert!(!settings.whitelist_add("my-intranet.example"));
        assert!(settings.whitelist_snapshot().contains("my-intranet.example"));

        assert!(settings.whitelist_remove("MY-INTRANET.example"));
        assert!(!settings.whitelist_remove("my-intranet.example"));
        assert!(settings.user_whitelist.is_empty());
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let settings = UserSettings::load("/nonexistent/phishing-shield-settings.json").unwrap();
        assert_eq!(settings.protection_level, ProtectionLevel::Normal);
        assert!(settings.user_whitelist.is_empty());
        assert!(settings.notifications_enabled);
    }

    #[test]
    fn json_round_trip() {
        let mut settings = UserSettings::default();
        settings.whitelist_add("example.org");
        settings.protection_level = ProtectionLevel::Strict;

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.protection_level, ProtectionLevel::Strict);
        assert_eq!(parsed.user_whitelist, vec!["example.org".to_string()]);
    }
}
