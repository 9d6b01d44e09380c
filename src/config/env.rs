//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::{MAX_REQUEST_COUNT, MAX_TIMEOUT_SECONDS};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists. Variables already set in the process
    /// environment win over the file.
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                println!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PREDICT_URL" => {
                let parsed = url::Url::parse(value.trim())
                    .map_err(|e| AppError::config(format!("Invalid PREDICT_URL '{}': {}", value, e)))?;
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!("PREDICT_URL must use http or https: {}", value)));
                }
            }
            "REQUEST_COUNT" => {
                let count: u32 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > MAX_REQUEST_COUNT {
                    return Err(AppError::config(format!(
                        "REQUEST_COUNT must be between 1 and {}, got: {}",
                        MAX_REQUEST_COUNT, count
                    )));
                }
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 1 and {}, got: {}",
                        MAX_TIMEOUT_SECONDS, timeout
                    )));
                }
            }
            "OUTPUT_DIR" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("OUTPUT_DIR cannot be empty"));
                }
            }
            "CHART_FONT" => {
                let path = Path::new(value.trim());
                if !value.trim().is_empty() && !path.is_file() {
                    return Err(AppError::config(format!("CHART_FONT file not found: {}", value)));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Supported variables as (name, description, example)
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PREDICT_URL", "Prediction endpoint URL", "http://localhost:8000/predict"),
            ("REQUEST_COUNT", "Requests per test case (1-10000)", "100"),
            ("TIMEOUT_SECONDS", "Request timeout in seconds (1-300)", "10"),
            ("OUTPUT_DIR", "Directory for CSV files and images", "."),
            ("CHART_FONT", "TrueType font used for chart text", "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<16} {}\n", var, description));
            help.push_str(&format!("  {:<16} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Check every supported variable currently set and collect warnings
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_env_var() {
        assert!(EnvManager::validate_env_var("PREDICT_URL", "https://example.com/predict").is_ok());
        assert!(EnvManager::validate_env_var("REQUEST_COUNT", "100").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "10").is_ok());
        assert!(EnvManager::validate_env_var("OUTPUT_DIR", "out").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());
        assert!(EnvManager::validate_env_var("SOMETHING_ELSE", "whatever").is_ok());

        assert!(EnvManager::validate_env_var("PREDICT_URL", "not-a-url").is_err());
        assert!(EnvManager::validate_env_var("PREDICT_URL", "ftp://example.com").is_err());
        assert!(EnvManager::validate_env_var("REQUEST_COUNT", "0").is_err());
        assert!(EnvManager::validate_env_var("REQUEST_COUNT", "10001").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "0").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "301").is_err());
        assert!(EnvManager::validate_env_var("OUTPUT_DIR", "  ").is_err());
        assert!(EnvManager::validate_env_var("CHART_FONT", "/no/such/font.ttf").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();

        assert!(help.contains("Supported Environment Variables:"));
        assert!(help.contains("PREDICT_URL"));
        assert!(help.contains("CHART_FONT"));
        assert!(help.contains("Configuration Priority"));
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EnvManager::load_env_file_from(&dir.path().join(".env"), false).is_ok());
    }
}
