use std::collections::HashSet;

/// Exact-membership lookup over the curated safe-domain set plus a
/// caller-supplied user whitelist snapshot. No suffix matching: a
/// subdomain of a listed domain is deliberately not covered, since
/// attacker-controlled subdomains of legitimate platforms are a common
/// phishing vehicle (the enterprise recognizer handles the legitimate
/// shapes instead).
pub struct AllowListStore {
    safe_domains: HashSet<String>,
}

impl AllowListStore {
    pub fn new(safe_domains: &[String]) -> Self {
        Self {
            safe_domains: safe_domains.iter().map(|d| d.to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, domain: &str, user_whitelist: &HashSet<String>) -> bool {
        self.safe_domains.contains(domain) || user_whitelist.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.safe_domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.safe_domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn store() -> AllowListStore {
        AllowListStore::new(&Config::default().safe_domains)
    }

    #[test]
    fn curated_domains_match_exactly() {
        let store = store();
        let empty = HashSet::new();

        assert!(store.contains("amazon.com", &empty));
        assert!(store.contains("nordea.fi", &empty));
        assert!(store.contains("localhost", &empty));
        // No suffix matching
        assert!(!store.contains("mail.amazon.com", &empty));
        assert!(!store.contains("amazon.com.evil.tk", &empty));
    }

    #[test]
    fn user_whitelist_is_consulted() {
        let store = store();
        let whitelist: HashSet<String> = ["myintranet.example".to_string()].into_iter().collect();

        assert!(store.contains("myintranet.example", &whitelist));
        assert!(!store.contains("myintranet.example", &HashSet::new()));
    }
}
