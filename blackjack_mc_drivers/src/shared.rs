use blackjack_mc::{AceSlice, EstimatorConfig, DEFAULT_NUMBER_OF_EPISODES};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid ace slice: {0}")]
    AceSlice(#[from] serde::de::value::Error),
    #[error("invalid configuration: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub estimation: ConfigEstimation,
    pub presentation: ConfigPresentation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigEstimation {
    pub number_of_episodes: u64,
    pub number_of_threads: usize,
    pub seed: Option<u64>,
    pub discount_factor: f64,
}

impl Default for ConfigEstimation {
    fn default() -> Self {
        Self {
            number_of_episodes: DEFAULT_NUMBER_OF_EPISODES,
            number_of_threads: 0,
            seed: None,
            discount_factor: 1.0,
        }
    }
}

impl TryInto<EstimatorConfig> for ConfigEstimation {
    type Error = ConfigError;

    fn try_into(self) -> Result<EstimatorConfig, Self::Error> {
        if self.number_of_episodes == 0 {
            return Err(ConfigError::InvalidValue(String::from(
                "number_of_episodes must be positive",
            )));
        }

        Ok(EstimatorConfig {
            number_of_episodes: self.number_of_episodes,
            number_of_threads: self.number_of_threads,
            seed: self.seed,
            discount_factor: self.discount_factor,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPresentation {
    pub ace_slice: String,
    /// Where to write the surface as JSON. Nothing is written when absent.
    pub json_output: Option<String>,
}

impl Default for ConfigPresentation {
    fn default() -> Self {
        Self {
            ace_slice: String::from("Usable"),
            json_output: None,
        }
    }
}

impl ConfigPresentation {
    pub fn get_ace_slice(&self) -> Result<AceSlice, ConfigError> {
        Ok(self.ace_slice.parse()?)
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: filename.to_string(),
        source,
    })?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_full_config() {
        let config = parse_config(
            r#"
estimation:
  number_of_episodes: 1000
  number_of_threads: 4
  seed: 42
  discount_factor: 0.9
presentation:
  ace_slice: NoUsable
  json_output: surface.json
"#,
        )
        .unwrap();
        let estimator_config: EstimatorConfig = config.estimation.try_into().unwrap();
        assert_eq!(estimator_config.number_of_episodes, 1000);
        assert_eq!(estimator_config.number_of_threads, 4);
        assert_eq!(estimator_config.seed, Some(42));
        assert_eq!(estimator_config.discount_factor, 0.9);
        assert_eq!(
            config.presentation.get_ace_slice().unwrap(),
            AceSlice::NoUsable
        );
        assert_eq!(
            config.presentation.json_output.as_deref(),
            Some("surface.json")
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse_config("estimation:\n  seed: 7\n").unwrap();
        assert_eq!(config.estimation.number_of_episodes, 50_000);
        assert_eq!(config.estimation.seed, Some(7));
        assert_eq!(config.estimation.discount_factor, 1.0);
        assert_eq!(
            config.presentation.get_ace_slice().unwrap(),
            AceSlice::Usable
        );
        assert!(config.presentation.json_output.is_none());
    }

    #[test]
    fn should_reject_zero_episodes() {
        let mut estimation = ConfigEstimation::default();
        estimation.number_of_episodes = 0;
        let converted: Result<EstimatorConfig, ConfigError> = estimation.try_into();
        assert!(matches!(converted, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn should_return_error_for_unknown_ace_slice() {
        let presentation = ConfigPresentation {
            ace_slice: String::from("Not a slice"),
            json_output: None,
        };
        assert!(matches!(
            presentation.get_ace_slice(),
            Err(ConfigError::AceSlice(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = parse_config_from_file("/definitely/not/here.yml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
