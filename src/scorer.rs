use crate::config::ScoringConfig;

/// Result of one scoring pass: the additive total plus the reason for
/// every triggered signal, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub reasons: Vec<String>,
}

/// Additive weighted scoring over lexical features of the hostname.
/// Unlike the pattern scan, every signal is evaluated; triggering one
/// signal never masks another, so the total is monotonic in the set of
/// triggered features.
pub struct SuspicionScorer {
    config: ScoringConfig,
}

impl SuspicionScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, domain: &str) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        let cfg = &self.config;

        if domain.len() > cfg.max_length {
            breakdown.total += cfg.length_weight;
            breakdown.reasons.push(format!(
                "Suspiciously long domain name ({} characters)",
                domain.len()
            ));
        }

        let hyphen_count = domain.matches('-').count();
        if hyphen_count > cfg.max_hyphens {
            breakdown.total += cfg.hyphen_weight;
            breakdown.reasons.push(format!(
                "Too many hyphens in domain ({hyphen_count} hyphens)"
            ));
        }

        let digit_count = domain.chars().filter(|c| c.is_ascii_digit()).count();
        if digit_count > cfg.max_digits {
            breakdown.total += cfg.digit_weight;
            breakdown.reasons.push(format!(
                "Too many numbers in domain ({digit_count} numbers)"
            ));
        }

        if let Some(tld) = domain.rsplit('.').next() {
            if domain.contains('.') && cfg.risky_tlds.iter().any(|risky| risky == tld) {
                breakdown.total += cfg.risky_tld_weight;
                breakdown
                    .reasons
                    .push("Uses high-risk domain extension".to_string());
            }
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() > 2 {
            let subdomain = labels[0];
            if cfg
                .suspicious_subdomains
                .iter()
                .any(|label| label == subdomain)
            {
                breakdown.total += cfg.subdomain_weight;
                breakdown
                    .reasons
                    .push(format!("Suspicious subdomain: {subdomain}"));
            }
        }

        log::debug!("Suspicion score for {domain}: {}", breakdown.total);
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn scorer() -> SuspicionScorer {
        SuspicionScorer::new(ScoringConfig::default())
    }

    #[test]
    fn clean_domain_scores_zero() {
        let breakdown = scorer().score("kirjasto.fi");
        assert_eq!(breakdown.total, 0);
        assert!(breakdown.reasons.is_empty());
    }

    #[test]
    fn digits_and_risky_tld() {
        let breakdown = scorer().score("secure-login-123456.tk");
        assert_eq!(breakdown.total, 50);
        assert_eq!(
            breakdown.reasons,
            vec![
                "Too many numbers in domain (6 numbers)".to_string(),
                "Uses high-risk domain extension".to_string(),
            ]
        );
    }

    #[test]
    fn all_lexical_signals_accumulate_in_order() {
        // 31 chars, 4 hyphens, 6 digits, .tk
        let breakdown = scorer().score("secure-login-test-abc-123456.tk");
        assert_eq!(breakdown.total, 95);
        assert_eq!(
            breakdown.reasons,
            vec![
                "Suspiciously long domain name (31 characters)".to_string(),
                "Too many hyphens in domain (4 hyphens)".to_string(),
                "Too many numbers in domain (6 numbers)".to_string(),
                "Uses high-risk domain extension".to_string(),
            ]
        );
    }

    #[test]
    fn suspicious_subdomain_needs_three_labels() {
        let scorer = scorer();

        let flagged = scorer.score("secure.example-site.com");
        assert_eq!(flagged.total, 15);
        assert_eq!(
            flagged.reasons,
            vec!["Suspicious subdomain: secure".to_string()]
        );

        // Only two labels: the first label is the registrable name,
        // not a subdomain
        let two_labels = scorer.score("secure.com");
        assert_eq!(two_labels.total, 0);
    }

    #[test]
    fn score_is_monotonic_in_triggered_signals() {
        let scorer = scorer();
        let base = scorer.score("secure-login-123456.tk").total;
        // Same features plus the length signal
        let longer = scorer.score("secure-login-0000-123456-extra.tk").total;
        assert!(longer >= base);
    }

    #[test]
    fn tld_matching_is_exact() {
        let scorer = scorer();
        // .click is risky, .clicks is not
        assert_eq!(scorer.score("prize.click").total, 30);
        assert_eq!(scorer.score("prize.clicks").total, 0);
    }
}
