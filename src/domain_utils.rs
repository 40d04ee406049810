use url::Url;

/// Minimal hostname normalization utilities
pub struct DomainUtils;

impl DomainUtils {
    /// Extract the normalized hostname from a full URL. Returns None
    /// when the URL does not parse or carries no host.
    pub fn host_from_url(raw: &str) -> Option<String> {
        let parsed = Url::parse(raw).ok()?;
        let host = parsed.host_str()?;
        Some(Self::canonicalize_domain(host))
    }

    /// Canonicalize a hostname: lower-case and strip a leading www label
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.trim().to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }

    /// Syntactic hostname check. IP literals are accepted since the
    /// allow list carries 127.0.0.1.
    pub fn is_valid_hostname(domain: &str) -> bool {
        !domain.is_empty() && url::Host::parse(domain).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_from_url() {
        assert_eq!(
            DomainUtils::host_from_url("https://www.Example.com/login?next=/"),
            Some("example.com".to_string())
        );
        assert_eq!(
            DomainUtils::host_from_url("http://sub.test.org:8080/path"),
            Some("sub.test.org".to_string())
        );
        assert_eq!(DomainUtils::host_from_url("not a url"), None);
        assert_eq!(DomainUtils::host_from_url("mailto:user@example.com"), None);
    }

    #[test]
    fn test_canonicalize_domain() {
        assert_eq!(
            DomainUtils::canonicalize_domain("www.example.com"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("Example.COM"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("example.com"),
            "example.com"
        );
    }

    #[test]
    fn test_is_valid_hostname() {
        assert!(DomainUtils::is_valid_hostname("example.com"));
        assert!(DomainUtils::is_valid_hostname("localhost"));
        assert!(DomainUtils::is_valid_hostname("127.0.0.1"));
        assert!(!DomainUtils::is_valid_hostname(""));
        assert!(!DomainUtils::is_valid_hostname("exa mple.com"));
    }
}
