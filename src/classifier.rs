use crate::allow_list::AllowListStore;
use crate::config::Config;
use crate::domain_utils::DomainUtils;
use crate::enterprise::EnterpriseHostRecognizer;
use crate::patterns::ThreatPatternMatcher;
use crate::scorer::SuspicionScorer;
use crate::typosquat::TyposquattingDetector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Five-way classification outcome. Severity orders
/// Safe < Caution < Suspicious < Dangerous; Unknown is the local
/// failure state for unparsable input and does not take part in the
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Caution,
    Suspicious,
    Dangerous,
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Caution => "caution",
            Verdict::Suspicious => "suspicious",
            Verdict::Dangerous => "dangerous",
            Verdict::Unknown => "unknown",
        }
    }

    /// Severity rank for comparisons between real verdicts. Unknown is
    /// not comparable and yields None.
    pub fn severity(&self) -> Option<u8> {
        match self {
            Verdict::Safe => Some(0),
            Verdict::Caution => Some(1),
            Verdict::Suspicious => Some(2),
            Verdict::Dangerous => Some(3),
            Verdict::Unknown => None,
        }
    }
}

/// Verdict plus the ordered, human-readable reasons behind it. Reasons
/// follow check-evaluation order and are empty for Safe and Unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: Verdict,
    pub reasons: Vec<String>,
}

impl ClassificationResult {
    fn clean(status: Verdict) -> Self {
        Self {
            status,
            reasons: Vec::new(),
        }
    }
}

/// The classification pipeline: allow list, enterprise recognizer,
/// threat patterns, typosquatting, then the suspicion score bands.
/// First applicable rule wins.
///
/// Classification is a pure function of the hostname and the whitelist
/// snapshot. All rule data is compiled once in `new` and read-only
/// afterwards; each call builds its own reasons list, so re-entrant
/// use from a navigation-event loop needs no coordination.
pub struct ClassificationEngine {
    allow_list: AllowListStore,
    enterprise: EnterpriseHostRecognizer,
    patterns: ThreatPatternMatcher,
    typosquat: TyposquattingDetector,
    scorer: SuspicionScorer,
    suspicious_threshold: u32,
    caution_threshold: u32,
}

impl ClassificationEngine {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            allow_list: AllowListStore::new(&config.safe_domains),
            enterprise: EnterpriseHostRecognizer::new(&config.enterprise_patterns)?,
            patterns: ThreatPatternMatcher::new(&config.threat_patterns)?,
            typosquat: TyposquattingDetector::new(&config.brand_domains),
            scorer: SuspicionScorer::new(config.scoring.clone()),
            suspicious_threshold: config.scoring.suspicious_threshold,
            caution_threshold: config.scoring.caution_threshold,
        })
    }

    /// Classify a normalized hostname against the rule data plus the
    /// caller's whitelist snapshot. Never fails: malformed input is
    /// absorbed as Unknown.
    pub fn classify(
        &self,
        domain: &str,
        user_whitelist: &HashSet<String>,
    ) -> ClassificationResult {
        let domain = DomainUtils::canonicalize_domain(domain);

        if !DomainUtils::is_valid_hostname(&domain) {
            log::debug!("Unparsable hostname, verdict unknown: {domain:?}");
            return ClassificationResult::clean(Verdict::Unknown);
        }

        if self.allow_list.contains(&domain, user_whitelist) {
            return ClassificationResult::clean(Verdict::Safe);
        }

        if self.enterprise.is_enterprise_host(&domain) {
            return ClassificationResult::clean(Verdict::Safe);
        }

        if let Some(hit) = self.patterns.find_match(&domain) {
            log::info!("Dangerous pattern verdict for {domain}");
            return ClassificationResult {
                status: Verdict::Dangerous,
                reasons: vec![hit.reason],
            };
        }

        if let Some(reason) = self.typosquat.find_typosquat(&domain) {
            log::info!("Typosquatting verdict for {domain}");
            return ClassificationResult {
                status: Verdict::Dangerous,
                reasons: vec![reason],
            };
        }

        let breakdown = self.scorer.score(&domain);
        if breakdown.total >= self.suspicious_threshold {
            return ClassificationResult {
                status: Verdict::Suspicious,
                reasons: breakdown.reasons,
            };
        }
        if breakdown.total >= self.caution_threshold {
            return ClassificationResult {
                status: Verdict::Caution,
                reasons: breakdown.reasons,
            };
        }

        ClassificationResult::clean(Verdict::Safe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ClassificationEngine {
        ClassificationEngine::new(&Config::default()).unwrap()
    }

    fn classify(domain: &str) -> ClassificationResult {
        engine().classify(domain, &HashSet::new())
    }

    #[test]
    fn allow_listed_domain_is_safe() {
        let result = classify("amazon.com");
        assert_eq!(result.status, Verdict::Safe);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn allow_list_precedence_beats_every_heuristic() {
        // paypal.com and nordea.fi sit on the brand and bank lists the
        // later checks guard; the allow list must still win outright.
        for domain in ["paypal.com", "nordea.fi", "localhost", "127.0.0.1"] {
            let result = classify(domain);
            assert_eq!(result.status, Verdict::Safe, "{domain}");
            assert!(result.reasons.is_empty());
        }
    }

    #[test]
    fn www_prefix_and_case_are_normalized() {
        assert_eq!(classify("www.Amazon.COM").status, Verdict::Safe);
    }

    #[test]
    fn user_whitelist_is_honored() {
        let engine = engine();
        let whitelist: HashSet<String> =
            ["secure-login-123456.tk".to_string()].into_iter().collect();

        let result = engine.classify("secure-login-123456.tk", &whitelist);
        assert_eq!(result.status, Verdict::Safe);
        assert!(result.reasons.is_empty());

        let without = engine.classify("secure-login-123456.tk", &HashSet::new());
        assert_eq!(without.status, Verdict::Caution);
    }

    #[test]
    fn enterprise_host_is_safe() {
        let result = classify("a1b2c3d4e5f6a7b8.cloudfront.net");
        assert_eq!(result.status, Verdict::Safe);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn typosquat_is_dangerous() {
        let result = classify("facebok.com");
        assert_eq!(result.status, Verdict::Dangerous);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("facebook.com"));
        assert!(result.reasons[0].contains("facebok.com"));
    }

    #[test]
    fn combosquat_pattern_is_dangerous() {
        let result = classify("secure-login-verify.info");
        assert_eq!(result.status, Verdict::Dangerous);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("combosquatting"));
    }

    #[test]
    fn moderate_score_is_caution() {
        let result = classify("secure-login-123456.tk");
        assert_eq!(result.status, Verdict::Caution);
        assert_eq!(
            result.reasons,
            vec![
                "Too many numbers in domain (6 numbers)".to_string(),
                "Uses high-risk domain extension".to_string(),
            ]
        );
    }

    #[test]
    fn high_score_is_suspicious() {
        let result = classify("secure-login-test-abc-123456.tk");
        assert_eq!(result.status, Verdict::Suspicious);
        assert_eq!(
            result.reasons,
            vec![
                "Suspiciously long domain name (31 characters)".to_string(),
                "Too many hyphens in domain (4 hyphens)".to_string(),
                "Too many numbers in domain (6 numbers)".to_string(),
                "Uses high-risk domain extension".to_string(),
            ]
        );
    }

    #[test]
    fn empty_input_is_unknown() {
        let result = classify("");
        assert_eq!(result.status, Verdict::Unknown);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn unparsable_input_is_unknown() {
        let result = classify("not a hostname");
        assert_eq!(result.status, Verdict::Unknown);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn pattern_verdict_outranks_scoring() {
        // Matches a brand-impersonation pattern AND would score heavily;
        // reasons must come from the pattern scan alone.
        let result = classify("amaz0n-secure-login-update-123456.com");
        assert_eq!(result.status, Verdict::Dangerous);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("Dangerous pattern detected"));
    }

    #[test]
    fn plain_domain_is_safe() {
        let result = classify("kirjasto.fi");
        assert_eq!(result.status, Verdict::Safe);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn classification_is_pure() {
        let engine = engine();
        let whitelist = HashSet::new();
        let first = engine.classify("secure-login-test-abc-123456.tk", &whitelist);
        let second = engine.classify("secure-login-test-abc-123456.tk", &whitelist);
        assert_eq!(first, second);

        // An interleaved call must not leak its reasons into the next
        let _ = engine.classify("facebok.com", &whitelist);
        let third = engine.classify("secure-login-test-abc-123456.tk", &whitelist);
        assert_eq!(first, third);
    }

    #[test]
    fn severity_ordering() {
        assert!(Verdict::Safe.severity() < Verdict::Caution.severity());
        assert!(Verdict::Caution.severity() < Verdict::Suspicious.severity());
        assert!(Verdict::Suspicious.severity() < Verdict::Dangerous.severity());
        assert_eq!(Verdict::Unknown.severity(), None);
    }
}
