use blackjack_advisor::Estimator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".blackjack_advisor.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] blackjack_advisor::Error),
    #[error("cannot find home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub advisor: ConfigAdvisor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigAdvisor {
    /// Monte Carlo trials per stand-now estimate.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// 0 means one thread per available core.
    #[serde(default = "default_number_of_threads")]
    pub number_of_threads: usize,
    /// Fixes the random stream for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> u32 {
    blackjack_advisor::DEFAULT_TRIALS
}

fn default_number_of_threads() -> usize {
    1
}

impl Default for ConfigAdvisor {
    fn default() -> Self {
        ConfigAdvisor {
            trials: default_trials(),
            number_of_threads: default_number_of_threads(),
            seed: None,
        }
    }
}

impl TryInto<Estimator> for ConfigAdvisor {
    type Error = blackjack_advisor::Error;

    fn try_into(self) -> Result<Estimator, Self::Error> {
        Estimator::new(self.trials, self.number_of_threads)
    }
}

/// Values given on the command line. Each one that is set replaces the value
/// read from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub trials: Option<u32>,
    pub number_of_threads: Option<usize>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Config {
        if let Some(trials) = overrides.trials {
            self.advisor.trials = trials;
        }
        if let Some(number_of_threads) = overrides.number_of_threads {
            self.advisor.number_of_threads = number_of_threads;
        }
        if overrides.seed.is_some() {
            self.advisor.seed = overrides.seed;
        }
        self
    }
}

/// Parses YAML config content. Missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
    let path = filename.as_ref();
    let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&file_content)
}

/// Loads the config at `path`, or the defaults if nothing exists there.
/// A directory at `path` is an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    if path.is_dir() {
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::Other,
                "this should be a file rather than a directory",
            ),
        });
    }
    parse_config_from_file(path)
}

/// Loads `~/.blackjack_advisor.yml`, or the defaults if there is no such file.
pub fn load_default_config() -> Result<Config, ConfigError> {
    let home_dir = home::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    load_config_or_default(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_full_config() {
        let config = parse_config(
            "advisor:\n  trials: 2000\n  number_of_threads: 4\n  seed: 17\n",
        )
        .unwrap();
        assert_eq!(
            config.advisor,
            ConfigAdvisor {
                trials: 2000,
                number_of_threads: 4,
                seed: Some(17),
            }
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse_config("advisor:\n  seed: 3\n").unwrap();
        assert_eq!(config.advisor.trials, 5000);
        assert_eq!(config.advisor.number_of_threads, 1);
        assert_eq!(config.advisor.seed, Some(3));

        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn can_convert_advisor() {
        let estimator: Estimator = ConfigAdvisor::default().try_into().unwrap();
        assert_eq!(estimator.trials(), 5000);
        assert_eq!(estimator.number_of_threads(), 1);
    }

    #[test]
    fn should_return_error_when_converting_zero_trials() {
        let config_advisor = ConfigAdvisor {
            trials: 0,
            ..Default::default()
        };
        let convert_result: Result<Estimator, blackjack_advisor::Error> =
            config_advisor.try_into();
        assert!(matches!(
            convert_result,
            Err(blackjack_advisor::Error::ZeroTrials)
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            parse_config("advisor:\n  trials: lots\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = parse_config_from_file("/definitely/not/here/blackjack.yml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("no_such_dir_for_blackjack_advisor/config.yml");
        assert_eq!(load_config_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn directory_at_config_path_is_an_error() {
        let result = load_config_or_default(std::env::temp_dir());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    fn file_config() -> Config {
        parse_config("advisor:\n  trials: 2000\n  number_of_threads: 4\n  seed: 17\n").unwrap()
    }

    #[test]
    fn no_overrides_keep_file_values() {
        let config = file_config().with_overrides(&ConfigOverrides::default());
        assert_eq!(config, file_config());
    }

    #[test]
    fn each_override_replaces_only_its_value() {
        let config = file_config().with_overrides(&ConfigOverrides {
            trials: Some(300),
            ..Default::default()
        });
        assert_eq!(config.advisor.trials, 300);
        assert_eq!(config.advisor.number_of_threads, 4);
        assert_eq!(config.advisor.seed, Some(17));

        let config = file_config().with_overrides(&ConfigOverrides {
            number_of_threads: Some(0),
            ..Default::default()
        });
        assert_eq!(config.advisor.trials, 2000);
        assert_eq!(config.advisor.number_of_threads, 0);
        assert_eq!(config.advisor.seed, Some(17));

        let config = file_config().with_overrides(&ConfigOverrides {
            seed: Some(99),
            ..Default::default()
        });
        assert_eq!(config.advisor.trials, 2000);
        assert_eq!(config.advisor.number_of_threads, 4);
        assert_eq!(config.advisor.seed, Some(99));
    }
}
