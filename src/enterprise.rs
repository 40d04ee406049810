use crate::config::compile_pattern;
use regex::Regex;

/// Recognizes subdomains issued by large hosting, CDN and identity
/// platforms by their structural naming conventions: bounded-length
/// hex or base36 labels under the provider suffix. The bare provider
/// domain never matches, so `evil.auth0.com` style rubber-stamping is
/// not possible for labels outside the provider's own scheme.
///
/// Consulted before pattern and score checks only; it suppresses false
/// positives from the generic heuristics, it never overrides a match
/// from a stronger rule.
pub struct EnterpriseHostRecognizer {
    patterns: Vec<Regex>,
}

impl EnterpriseHostRecognizer {
    pub fn new(patterns: &[String]) -> anyhow::Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| compile_pattern(p).map_err(anyhow::Error::from))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_enterprise_host(&self, domain: &str) -> bool {
        for pattern in &self.patterns {
            if pattern.is_match(domain) {
                log::debug!("Enterprise host recognized: {domain}");
                return true;
            }
        }
        false
    }
}
