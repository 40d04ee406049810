use crate::config::{compile_pattern, PatternCategory, PatternRule};
use regex::Regex;

/// Outcome of a threat-pattern scan: the matched category plus the
/// human-readable reason attached to the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub category: PatternCategory,
    pub reason: String,
}

/// Ordered short-circuit scan over the curated phishing-shape patterns.
/// Evaluation order follows the rule file; the first matching rule
/// decides the reason attribution.
///
/// Several curated patterns anchor only the TLD suffix, not the start
/// of the hostname, so they behave as substring-before-suffix tests.
/// That matches the rule set as curated and is kept as-is.
pub struct ThreatPatternMatcher {
    rules: Vec<(Regex, PatternCategory)>,
}

impl ThreatPatternMatcher {
    pub fn new(rules: &[PatternRule]) -> anyhow::Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                compile_pattern(&rule.pattern)
                    .map(|regex| (regex, rule.category))
                    .map_err(anyhow::Error::from)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn find_match(&self, domain: &str) -> Option<PatternMatch> {
        for (regex, category) in &self.rules {
            if regex.is_match(domain) {
                log::debug!("Threat pattern hit for {domain}: {}", regex.as_str());
                return Some(PatternMatch {
                    category: *category,
                    reason: format!(
                        "Dangerous pattern detected: {} matches {}",
                        domain,
                        category.describe()
                    ),
                });
            }
        }
        None
    }
}
