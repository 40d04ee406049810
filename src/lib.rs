pub mod allow_list;
pub mod classifier;
pub mod config;
pub mod domain_utils;
pub mod enterprise;
pub mod patterns;
pub mod report;
pub mod scorer;
pub mod settings;
pub mod statistics;
pub mod typosquat;

pub use classifier::{ClassificationEngine, ClassificationResult, Verdict};
pub use config::{Config, PatternCategory, PatternRule};
pub use domain_utils::DomainUtils;
pub use settings::UserSettings;
pub use statistics::StatisticsCollector;
