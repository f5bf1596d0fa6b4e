use clap::Parser;
use std::path::PathBuf;

use crate::predict::{games_needed, DEFAULT_BEST_OF, DEFAULT_HOME_BONUS};

/// Game and series win-probability API
#[derive(Parser, Debug, Clone)]
#[command(name = "series-predictor", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Trained model artifact (JSON). When unset, the search paths are tried
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Comma-separated artifact locations to try, in order
    #[arg(long, env = "MODEL_SEARCH_PATHS", value_delimiter = ',')]
    pub model_search_paths: Vec<PathBuf>,

    /// Start without a model; model endpoints then answer 404
    #[arg(long, env = "ALLOW_MISSING_MODEL", default_value = "false")]
    pub allow_missing_model: bool,

    /// Rating points granted to the home side when a request gives none
    #[arg(long, env = "HOME_BONUS", default_value_t = DEFAULT_HOME_BONUS)]
    pub home_bonus: f64,

    /// Series length used when a request gives none (positive, odd)
    #[arg(long, env = "DEFAULT_BEST_OF", default_value_t = DEFAULT_BEST_OF, allow_negative_numbers = true)]
    pub default_best_of: i64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.home_bonus.is_finite() {
            anyhow::bail!("home_bonus must be a finite number");
        }
        if let Err(e) = games_needed(self.default_best_of) {
            anyhow::bail!("default_best_of: {}", e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::parse_from(["series-predictor"]);
        assert_eq!(config.home_bonus, 65.0);
        assert_eq!(config.default_best_of, 7);
        assert!(config.model_path.is_none());
        assert!(!config.allow_missing_model);
        config.validate().unwrap();
    }

    #[test]
    fn search_paths_split_on_commas() {
        let config =
            Config::parse_from(["series-predictor", "--model-search-paths", "a/clf.json,b/clf.json"]);
        assert_eq!(
            config.model_search_paths,
            vec![PathBuf::from("a/clf.json"), PathBuf::from("b/clf.json")]
        );
    }

    #[test]
    fn even_default_series_is_rejected() {
        let config = Config::parse_from(["series-predictor", "--default-best-of", "4"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_bonus_is_rejected() {
        let config = Config::parse_from(["series-predictor", "--home-bonus", "inf"]);
        assert!(config.validate().is_err());
    }
}
