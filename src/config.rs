use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Full rule data for the classifier: curated safe domains, threat
/// patterns, enterprise hosting patterns, the typosquatting brand list
/// and the suspicion-scoring weights. All of it is data, not code, so
/// deployments can ship updated lists without a new binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub safe_domains: Vec<String>,
    pub threat_patterns: Vec<PatternRule>,
    pub enterprise_patterns: Vec<String>,
    pub brand_domains: Vec<String>,
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
}

/// A single threat pattern: case-insensitive regex over the normalized
/// hostname, tagged with the category named in the verdict reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    pub category: PatternCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternCategory {
    ScamKeyword,
    BrandImpersonation,
    FreeHosting,
    BankImpersonation,
    Combosquatting,
}

impl PatternCategory {
    pub fn describe(&self) -> &'static str {
        match self {
            PatternCategory::ScamKeyword => "a security-scam keyword pattern",
            PatternCategory::BrandImpersonation => "a brand impersonation pattern",
            PatternCategory::FreeHosting => "a free-hosting phishing pattern",
            PatternCategory::BankImpersonation => "a bank impersonation pattern",
            PatternCategory::Combosquatting => "a combosquatting pattern",
        }
    }
}

/// Weights and thresholds for the additive suspicion score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub max_length: usize,
    pub length_weight: u32,
    pub max_hyphens: usize,
    pub hyphen_weight: u32,
    pub max_digits: usize,
    pub digit_weight: u32,
    pub risky_tlds: Vec<String>,
    pub risky_tld_weight: u32,
    pub suspicious_subdomains: Vec<String>,
    pub subdomain_weight: u32,
    pub suspicious_threshold: u32,
    pub caution_threshold: u32,
}

/// Where the CLI persists user settings, statistics and false-positive
/// reports. The classifier itself never touches these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub settings_path: String,
    pub stats_path: String,
    pub reports_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: "/var/lib/phishing-shield/settings.json".to_string(),
            stats_path: "/var/lib/phishing-shield/stats.json".to_string(),
            reports_path: "/var/lib/phishing-shield/reports.json".to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_length: 30,
            length_weight: 20,
            max_hyphens: 3,
            hyphen_weight: 25,
            max_digits: 3,
            digit_weight: 20,
            risky_tlds: to_strings(&["tk", "ml", "ga", "cf", "top", "loan", "download", "click"]),
            risky_tld_weight: 30,
            suspicious_subdomains: to_strings(&[
                "secure", "login", "account", "verify", "security",
            ]),
            subdomain_weight: 15,
            suspicious_threshold: 80,
            caution_threshold: 40,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            safe_domains: to_strings(&[
                // Major search engines
                "google.com",
                "google.fi",
                "google.co.uk",
                "google.de",
                "google.fr",
                "google.ca",
                "google.com.au",
                "bing.com",
                "yahoo.com",
                "duckduckgo.com",
                "yandex.com",
                "baidu.com",
                // Social media
                "facebook.com",
                "instagram.com",
                "twitter.com",
                "x.com",
                "linkedin.com",
                "tiktok.com",
                "discord.com",
                "reddit.com",
                "snapchat.com",
                "telegram.org",
                "whatsapp.com",
                "pinterest.com",
                // Microsoft ecosystem
                "microsoft.com",
                "outlook.com",
                "office.com",
                "live.com",
                "hotmail.com",
                "msn.com",
                "azure.com",
                "xbox.com",
                "skype.com",
                "teams.microsoft.com",
                // Apple ecosystem
                "apple.com",
                "icloud.com",
                "itunes.com",
                "mac.com",
                "me.com",
                "appleid.apple.com",
                // Amazon ecosystem
                "amazon.com",
                "amazon.co.uk",
                "amazon.de",
                "amazon.fr",
                "amazon.ca",
                "amazon.com.au",
                "amazon.jp",
                "amazon.in",
                "amazon.it",
                "amazon.es",
                "amazon.com.br",
                // E-commerce
                "ebay.com",
                "shopify.com",
                "etsy.com",
                "walmart.com",
                "target.com",
                "alibaba.com",
                // Financial services
                "paypal.com",
                "stripe.com",
                "wise.com",
                "revolut.com",
                "klarna.com",
                "coinbase.com",
                "binance.com",
                "kraken.com",
                "square.com",
                // Finnish services
                "nordea.fi",
                "op.fi",
                "danske.fi",
                "handelsbanken.fi",
                "aktia.fi",
                "saastopankki.fi",
                "suomi.fi",
                "kela.fi",
                "vero.fi",
                "traficom.fi",
                "dvv.fi",
                "valtioneuvosto.fi",
                "verkkokauppa.com",
                "elisa.fi",
                "telia.fi",
                "dna.fi",
                "posti.fi",
                "matkahuolto.fi",
                "yle.fi",
                "hs.fi",
                "is.fi",
                "iltalehti.fi",
                "mtv.fi",
                "nelonen.fi",
                // Technology and development
                "github.com",
                "gitlab.com",
                "stackoverflow.com",
                "npmjs.com",
                "docker.com",
                // Media and entertainment
                "youtube.com",
                "netflix.com",
                "spotify.com",
                "steam.com",
                "twitch.tv",
                // Testing domains
                "localhost",
                "127.0.0.1",
                "scannec.com",
                "example.com",
                "test.com",
            ]),
            threat_patterns: vec![
                // Security update scams
                rule(
                    r".*-security-?(update|verification|alert)\.(com|net|org|co\.uk|info)$",
                    PatternCategory::ScamKeyword,
                ),
                rule(
                    r".*-account-?(suspended|locked|verification)\.(com|net|org|co\.uk|info)$",
                    PatternCategory::ScamKeyword,
                ),
                // Known brand impersonations (digit-for-letter look-alikes)
                rule(
                    r".*amaz[o0]n[^.]*\.(com|net|org|co\.uk)$",
                    PatternCategory::BrandImpersonation,
                ),
                rule(
                    r".*payp[a4]l[^.]*\.(com|net|org|co\.uk)$",
                    PatternCategory::BrandImpersonation,
                ),
                rule(
                    r".*g[o0]{2,}gle\.(com|net|org|co\.uk)$",
                    PatternCategory::BrandImpersonation,
                ),
                rule(
                    r".*microsoft.*-account.*\.(com|net|org|co\.uk)$",
                    PatternCategory::BrandImpersonation,
                ),
                rule(
                    r".*fac[e3]b[o0]{2}k\.(com|net|org|co\.uk)$",
                    PatternCategory::BrandImpersonation,
                ),
                // Free hosting phishing
                rule(r".*-login\.vercel\.app$", PatternCategory::FreeHosting),
                rule(r".*-auth\.netlify\.app$", PatternCategory::FreeHosting),
                rule(r".*signin.*\.herokuapp\.com$", PatternCategory::FreeHosting),
                rule(r".*secure.*\.surge\.sh$", PatternCategory::FreeHosting),
                // Finnish banks
                rule(
                    r".*nord[e3][a4].*\.(com|net|org)$",
                    PatternCategory::BankImpersonation,
                ),
                rule(
                    r".*[o0]p-pankki.*\.(com|net|org)$",
                    PatternCategory::BankImpersonation,
                ),
                rule(
                    r".*dansk[e3].*bank.*\.(com|net|org)$",
                    PatternCategory::BankImpersonation,
                ),
                // Combosquatting
                rule(
                    r".*-?(security|secure|login|signin|account|verify|verification|confirm|confirmation)-?.*\.(com|net|org|co|info|biz)$",
                    PatternCategory::Combosquatting,
                ),
                rule(
                    r".*-?(update|renewal|restore|recovery|support|service|help|assist)-?.*\.(com|net|org|co|info|biz)$",
                    PatternCategory::Combosquatting,
                ),
                rule(
                    r".*-?(suspended|locked|blocked|expired|urgent|immediate|alert|warning)-?.*\.(com|net|org|co|info|biz)$",
                    PatternCategory::Combosquatting,
                ),
            ],
            enterprise_patterns: to_strings(&[
                // Amazon Web Services
                r"^[a-f0-9]{16,64}\.execute-api\.[a-z0-9-]+\.amazonaws\.com$",
                r"^[a-f0-9]{16,64}\.cloudfront\.net$",
                r"^[a-z0-9-]{10,63}\.s3\.[a-z0-9-]+\.amazonaws\.com$",
                r"^[a-z0-9-]{10,63}\.s3\.amazonaws\.com$",
                // Microsoft Azure
                r"^[a-f0-9-]{30,}\.azurewebsites\.net$",
                r"^[a-z0-9]{10,24}\.blob\.core\.windows\.net$",
                r"^[a-z0-9-]{10,63}\.servicebus\.windows\.net$",
                // Google Cloud Platform
                r"^[a-z0-9-]{10,63}\.appspot\.com$",
                r"^[a-z0-9-]{10,63}\.cloudfunctions\.net$",
                r"^[a-f0-9]{8,64}\.web\.app$",
                r"^[a-f0-9]{8,64}\.firebaseapp\.com$",
                // Cloudflare
                r"^[a-f0-9]{8,32}\.workers\.dev$",
                r"^[a-f0-9]{8,32}\.pages\.dev$",
                // GitHub
                r"^[a-z0-9-]{1,39}\.github\.io$",
                r"^[a-z0-9-]{8,63}\.githubusercontent\.com$",
                // Netlify deploy previews
                r"^[a-f0-9]{8,16}-[a-f0-9]{8,16}--[a-z0-9-]{1,63}\.netlify\.app$",
                r"^[a-z0-9-]{3,63}--[a-f0-9]{8,16}\.netlify\.app$",
                // Vercel deployments
                r"^[a-z0-9-]{3,63}-[a-f0-9]{8,10}\.vercel\.app$",
                r"^[a-z0-9-]{3,63}-[a-z0-9]{4,10}-[a-f0-9]{8,10}\.vercel\.app$",
                // Facebook/Meta content delivery
                r"^[a-z0-9-]{8,32}\.fbcdn\.net$",
                r"^[a-z0-9-]{8,32}\.facebook\.com$",
                // Google ad serving
                r"^[a-z0-9-]{8,32}\.doubleclick\.net$",
                r"^[a-z0-9-]{8,32}\.googleadservices\.com$",
                r"^[a-z0-9-]{8,32}\.googlesyndication\.com$",
                // Identity platforms
                r"^[a-z0-9-]{8,32}\.okta\.com$",
                r"^[a-z0-9-]{8,32}\.auth0\.com$",
                r"^[a-z0-9-]{8,32}\.onelogin\.com$",
            ]),
            brand_domains: to_strings(&[
                "google.com",
                "facebook.com",
                "amazon.com",
                "paypal.com",
                "microsoft.com",
                "apple.com",
                "netflix.com",
                "instagram.com",
                "twitter.com",
                "linkedin.com",
            ]),
            scoring: ScoringConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Compile every regex in the config, collecting errors per pattern.
    /// Used by --test-config so a bad rule file fails loudly at startup
    /// rather than at classification time.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for rule in &self.threat_patterns {
            if let Err(e) = compile_pattern(&rule.pattern) {
                errors.push(format!("threat pattern '{}': {}", rule.pattern, e));
            }
        }

        for pattern in &self.enterprise_patterns {
            if let Err(e) = compile_pattern(pattern) {
                errors.push(format!("enterprise pattern '{}': {}", pattern, e));
            }
        }

        if self.scoring.caution_threshold > self.scoring.suspicious_threshold {
            errors.push(format!(
                "caution threshold {} exceeds suspicious threshold {}",
                self.scoring.caution_threshold, self.scoring.suspicious_threshold
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// All hostname patterns are matched case-insensitively, mirroring the
/// /i flag on the original curated rule set.
pub fn compile_pattern(pattern: &str) -> Result<regex::Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn rule(pattern: &str, category: PatternCategory) -> PatternRule {
    PatternRule {
        pattern: pattern.to_string(),
        category,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
