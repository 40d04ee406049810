use clap::{Arg, Command};
use log::LevelFilter;
use phishing_shield::classifier::ClassificationEngine;
use phishing_shield::config::Config;
use phishing_shield::domain_utils::DomainUtils;
use phishing_shield::report::ReportStore;
use phishing_shield::settings::UserSettings;
use phishing_shield::statistics::StatisticsCollector;
use std::process;

fn main() {
    let matches = Command::new("phishing-shield")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Domain threat classifier behind the PhishingShield browser add-on")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/phishing-shield.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the built-in rule data as a config file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and compile every pattern")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .value_name("DOMAIN")
                .help("Classify a single hostname")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-url")
                .long("check-url")
                .value_name("URL")
                .help("Extract the hostname from a URL and classify it")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .value_name("FILE")
                .help("Classify one hostname per line from a file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit classification results as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report-false-positive")
                .long("report-false-positive")
                .value_name("DOMAIN")
                .help("Record a false-positive report and whitelist the domain")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Show usage statistics")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stats-reset")
                .long("stats-reset")
                .help("Reset all statistics and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-check detail")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config_path = matches.get_one::<String>("config").unwrap();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config);
        return;
    }

    if matches.get_flag("stats") {
        show_stats(&config);
        return;
    }

    if matches.get_flag("stats-reset") {
        reset_stats(&config);
        return;
    }

    if let Some(domain) = matches.get_one::<String>("report-false-positive") {
        report_false_positive(&config, domain);
        return;
    }

    let engine = match ClassificationEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error compiling rule patterns: {e}");
            process::exit(1);
        }
    };

    let as_json = matches.get_flag("json");

    if let Some(domain) = matches.get_one::<String>("check") {
        check_domain(&config, &engine, domain, as_json);
        return;
    }

    if let Some(url) = matches.get_one::<String>("check-url") {
        match DomainUtils::host_from_url(url) {
            Some(domain) => check_domain(&config, &engine, &domain, as_json),
            None => {
                eprintln!("Could not extract a hostname from: {url}");
                process::exit(1);
            }
        }
        return;
    }

    if let Some(file) = matches.get_one::<String>("batch") {
        check_batch(&config, &engine, file, as_json);
        return;
    }

    eprintln!("Nothing to do. Try --check DOMAIN, or --help for the full option list.");
    process::exit(2);
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        log::info!("Loading configuration from {path}");
        let config = Config::from_file(path)?;
        Ok(config)
    } else {
        log::warn!("Configuration file {path} not found, using built-in rule data");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => println!("Default configuration written to: {path}"),
        Err(e) => {
            eprintln!("Error writing configuration: {e}");
            process::exit(1);
        }
    }
}

fn test_config(config: &Config) {
    println!("Testing configuration...");
    println!("  Safe domains:        {}", config.safe_domains.len());
    println!("  Threat patterns:     {}", config.threat_patterns.len());
    println!("  Enterprise patterns: {}", config.enterprise_patterns.len());
    println!("  Brand domains:       {}", config.brand_domains.len());

    match config.validate() {
        Ok(()) => println!("Configuration is valid!"),
        Err(errors) => {
            println!("Configuration has {} error(s):", errors.len());
            for error in errors {
                println!("  - {error}");
            }
            process::exit(1);
        }
    }
}

fn check_domain(config: &Config, engine: &ClassificationEngine, domain: &str, as_json: bool) {
    let settings = load_settings(config);
    let whitelist = settings.whitelist_snapshot();
    let result = engine.classify(domain, &whitelist);

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}: {}", domain, result.status.as_str().to_uppercase());
        for reason in &result.reasons {
            println!("  - {reason}");
        }
    }

    record_verdict(config, result.status);
}

fn check_batch(config: &Config, engine: &ClassificationEngine, file: &str, as_json: bool) {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading batch file {file}: {e}");
            process::exit(1);
        }
    };

    for line in content.lines() {
        let domain = line.trim();
        if domain.is_empty() || domain.starts_with('#') {
            continue;
        }
        check_domain(config, engine, domain, as_json);
    }
}

fn report_false_positive(config: &Config, domain: &str) {
    let domain = DomainUtils::canonicalize_domain(domain);

    let mut settings = load_settings(config);
    if settings.whitelist_add(&domain) {
        if let Err(e) = settings.save(&config.storage.settings_path) {
            log::warn!("Could not save settings: {e}");
        }
        println!("{domain} added to the user whitelist");
    } else {
        println!("{domain} is already whitelisted");
    }

    if !settings.reporting_enabled {
        log::info!("Reporting disabled in settings, skipping report submission");
        return;
    }

    match ReportStore::open(&config.storage.reports_path) {
        Ok(mut store) => {
            store.cleanup_old();
            let id = store.submit(&domain, "dangerous", &[]);
            if let Err(e) = store.flush() {
                log::warn!("Could not save reports: {e}");
            }
            println!("False positive report recorded ({id})");
        }
        Err(e) => log::warn!("Could not open report store: {e}"),
    }

    match StatisticsCollector::open(&config.storage.stats_path) {
        Ok(mut stats) => {
            stats.record_false_positive();
            if let Err(e) = stats.flush() {
                log::warn!("Could not save statistics: {e}");
            }
        }
        Err(e) => log::warn!("Could not open statistics store: {e}"),
    }
}

fn load_settings(config: &Config) -> UserSettings {
    match UserSettings::load(&config.storage.settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Could not load settings, using defaults: {e}");
            UserSettings::default()
        }
    }
}

fn record_verdict(config: &Config, verdict: phishing_shield::Verdict) {
    match StatisticsCollector::open(&config.storage.stats_path) {
        Ok(mut stats) => {
            stats.record_verdict(verdict);
            if let Err(e) = stats.flush() {
                log::warn!("Could not save statistics: {e}");
            }
        }
        Err(e) => log::warn!("Could not open statistics store: {e}"),
    }
}

fn show_stats(config: &Config) {
    match StatisticsCollector::open(&config.storage.stats_path) {
        Ok(stats) => {
            let s = stats.stats();
            println!("PhishingShield statistics");
            println!("  Sites analyzed:    {}", s.sites_analyzed);
            println!("  Threats blocked:   {}", s.threats_blocked);
            println!("  False positives:   {}", s.false_positives);
            println!("  Reports submitted: {}", s.reports_submitted);
            println!("  Collecting since:  {}", s.start_time.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Err(e) => {
            eprintln!("Error reading statistics: {e}");
            process::exit(1);
        }
    }
}

fn reset_stats(config: &Config) {
    match StatisticsCollector::open(&config.storage.stats_path) {
        Ok(mut stats) => {
            stats.reset();
            if let Err(e) = stats.flush() {
                eprintln!("Error saving statistics: {e}");
                process::exit(1);
            }
            println!("Statistics reset");
        }
        Err(e) => {
            eprintln!("Error reading statistics: {e}");
            process::exit(1);
        }
    }
}
