use strsim::levenshtein;

/// Edit-distance comparison of the candidate hostname against a small
/// list of high-value brand domains. A candidate within one or two
/// edits of a brand, without being the brand itself, is almost always
/// a registration meant to catch typos.
pub struct TyposquattingDetector {
    brand_domains: Vec<String>,
}

impl TyposquattingDetector {
    pub fn new(brand_domains: &[String]) -> Self {
        Self {
            brand_domains: brand_domains.iter().map(|d| d.to_lowercase()).collect(),
        }
    }

    /// Returns the reason for the first brand within edit distance 1-2.
    /// Distance 0 is exact equality and is excluded; the allow list has
    /// already vouched for the genuine brand domains by the time this
    /// runs.
    pub fn find_typosquat(&self, domain: &str) -> Option<String> {
        for brand in &self.brand_domains {
            let distance = levenshtein(domain, brand);
            if distance > 0 && distance <= 2 {
                log::debug!("Typosquat suspect: {domain} vs {brand} (distance {distance})");
                return Some(format!(
                    "Possible typosquatting: \"{domain}\" closely resembles \"{brand}\""
                ));
            }
        }
        None
    }
}
