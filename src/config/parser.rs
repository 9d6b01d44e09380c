//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::BenchConfig};

/// Combines defaults, `.env`/environment values and CLI arguments, in that
/// order of increasing precedence
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration. With `--debug`, environment
    /// values that will fail validation are listed once `.env` is loaded.
    pub fn parse(&self) -> Result<BenchConfig> {
        EnvManager::load_env_file(self.cli.debug)?;
        if self.cli.debug {
            for warning in EnvManager::validate_current_env() {
                println!("{}", warning);
            }
        }
        self.parse_with_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`parse`](Self::parse) with environment values taken from
    /// `lookup` and no `.env` loading
    pub fn parse_with_lookup<F>(&self, lookup: F) -> Result<BenchConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = BenchConfig::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut BenchConfig) {
        if let Some(ref url) = self.cli.url {
            config.endpoint_url = url.clone();
        }

        if let Some(count) = self.cli.count {
            config.request_count = count;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(ref dir) = self.cli.output_dir {
            config.output_dir = dir.clone();
        }

        if let Some(ref font) = self.cli.font {
            config.font_path = Some(font.clone());
        }

        if let Some(ref file) = self.cli.cases_file {
            config.cases_file = Some(file.clone());
        }

        if !self.cli.cases.is_empty() {
            config.case_filter = self.cli.cases.clone();
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<BenchConfig> {
    ConfigParser::new(cli).parse()
}

/// Configuration summary for debug output
pub fn display_config_summary(config: &BenchConfig) -> String {
    let mut summary = vec![
        format!("Endpoint URL: {}", config.endpoint_url),
        format!("Requests per case: {}", config.request_count),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("Output directory: {}", config.output_dir.display()),
    ];

    match &config.cases_file {
        Some(path) => summary.push(format!("Cases file: {}", path.display())),
        None => summary.push("Cases file: built-in".to_string()),
    }
    if !config.case_filter.is_empty() {
        summary.push(format!("Case filter: {}", config.case_filter.join(", ")));
    }
    match &config.font_path {
        Some(path) => summary.push(format!("Chart font: {}", path.display())),
        None => summary.push("Chart font: auto-detect".to_string()),
    }
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_parser_defaults() {
        let cli = Cli::parse_from(["plb"]);
        let config = ConfigParser::new(cli).parse_with_lookup(no_env).unwrap();

        assert_eq!(config.endpoint_url, crate::defaults::DEFAULT_ENDPOINT_URL);
        assert_eq!(config.request_count, crate::defaults::DEFAULT_REQUEST_COUNT);
        assert_eq!(config.timeout_seconds, crate::defaults::DEFAULT_TIMEOUT.as_secs());
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.case_filter.is_empty());
        assert!(config.font_path.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "plb", "--url", "http://localhost:1/predict", "--count", "10", "--timeout", "5",
            "--output-dir", "results", "--case", "real_news_1", "--no-color", "--verbose",
        ]);
        let config = ConfigParser::new(cli).parse_with_lookup(no_env).unwrap();

        assert_eq!(config.endpoint_url, "http://localhost:1/predict");
        assert_eq!(config.request_count, 10);
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.case_filter, vec!["real_news_1"]);
        assert!(!config.enable_color);
        assert!(config.verbose);
    }

    #[test]
    fn test_env_values_apply_without_cli() {
        let cli = Cli::parse_from(["plb"]);
        let env = env_of(&[
            ("PREDICT_URL", "https://example.com/predict"),
            ("REQUEST_COUNT", "7"),
            ("OUTPUT_DIR", "/tmp/plb"),
            ("CHART_FONT", "/fonts/a.ttf"),
        ]);
        let config = ConfigParser::new(cli).parse_with_lookup(env).unwrap();

        assert_eq!(config.endpoint_url, "https://example.com/predict");
        assert_eq!(config.request_count, 7);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/plb"));
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/a.ttf")));
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let cli = Cli::parse_from(["plb", "--count", "12"]);
        let env = env_of(&[("REQUEST_COUNT", "8"), ("TIMEOUT_SECONDS", "4")]);
        let config = ConfigParser::new(cli).parse_with_lookup(env).unwrap();

        assert_eq!(config.request_count, 12);
        assert_eq!(config.timeout_seconds, 4);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let cli = Cli::parse_from(["plb"]);
        let err = ConfigParser::new(cli)
            .parse_with_lookup(env_of(&[("REQUEST_COUNT", "many")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_final_config_is_validated() {
        let cli = Cli::parse_from(["plb", "--url", "ftp://example.com/predict"]);
        assert!(ConfigParser::new(cli).parse_with_lookup(no_env).is_err());

        let cli = Cli::parse_from(["plb"]);
        let err = ConfigParser::new(cli)
            .parse_with_lookup(env_of(&[("REQUEST_COUNT", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_config_summary() {
        let summary = display_config_summary(&BenchConfig::default());

        assert!(summary.contains("Endpoint URL:"));
        assert!(summary.contains("Requests per case: 100"));
        assert!(summary.contains("Timeout: 10s"));
        assert!(summary.contains("Cases file: built-in"));
        assert!(summary.contains("Chart font: auto-detect"));
    }
}
