//! Simulation settings.
//!
//! Settings start from [`SimulationConfig::default`], are optionally
//! overlaid by a JSON file, and finally by command-line flags.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hasher::HashAlgorithm;
use crate::report::{DigestFormat, ReportFormat};

/// Number of votes recorded when nothing else is requested.
pub const DEFAULT_VOTES: usize = 10;

/// Parameters for one simulated election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total blocks to record, genesis included.
    pub votes: usize,
    /// Sampler seed; taken from the wall clock when absent.
    pub seed: Option<u64>,
    /// Digest strategy used to seal blocks.
    pub algorithm: HashAlgorithm,
    /// Report flavour written at the end of the run.
    pub format: ReportFormat,
    /// Digest rendering in the text report.
    pub digests: DigestFormat,
    /// Emit one progress line per recorded block on stderr.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            votes: DEFAULT_VOTES,
            seed: None,
            algorithm: HashAlgorithm::default(),
            format: ReportFormat::default(),
            digests: DigestFormat::default(),
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Loads settings from a JSON file; omitted fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|err| ConfigError::Decode(format!("{}: {err}", path.display())))
    }

    /// Builds settings from command-line arguments (program name excluded).
    ///
    /// `--config <path>` is applied first wherever it appears, so explicit
    /// flags always win over the file.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = match config_path(&args)? {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            match flag.as_str() {
                "--config" => {
                    iter.next();
                }
                "--votes" => config.votes = parse_value(flag, iter.next())?,
                "--seed" => config.seed = Some(parse_value(flag, iter.next())?),
                "--hash" => config.algorithm = parse_value(flag, iter.next())?,
                "--format" => config.format = parse_value(flag, iter.next())?,
                "--hex" => config.digests = DigestFormat::Hex,
                "--verbose" | "-v" => config.verbose = true,
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
        }
        Ok(config)
    }

    /// Seed for this run, falling back to the current time.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

fn config_path(args: &[String]) -> Result<Option<&str>, ConfigError> {
    match args.iter().position(|arg| arg == "--config") {
        Some(pos) => args
            .get(pos + 1)
            .map(|path| Some(path.as_str()))
            .ok_or_else(|| ConfigError::MissingValue("--config".to_string())),
        None => Ok(None),
    }
}

fn parse_value<T>(flag: &str, value: Option<&String>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("vote_chain_config_{nanos}.json"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.votes, DEFAULT_VOTES);
        assert_eq!(config.algorithm, HashAlgorithm::String);
    }

    #[test]
    fn test_flags() {
        let config = SimulationConfig::from_args([
            "--votes", "3", "--seed", "99", "--hash", "sha3", "--format", "json", "--hex", "-v",
        ])
        .unwrap();
        assert_eq!(config.votes, 3);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.resolved_seed(), 99);
        assert_eq!(config.algorithm, HashAlgorithm::Sha3);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.digests, DigestFormat::Hex);
        assert!(config.verbose);
    }

    #[test]
    fn test_flag_errors() {
        assert!(matches!(
            SimulationConfig::from_args(["--votes"]),
            Err(ConfigError::MissingValue(flag)) if flag == "--votes"
        ));
        assert!(matches!(
            SimulationConfig::from_args(["--votes", "many"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            SimulationConfig::from_args(["--hash", "md5"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            SimulationConfig::from_args(["--quorum", "2"]),
            Err(ConfigError::UnknownFlag(flag)) if flag == "--quorum"
        ));
    }

    #[test]
    fn test_file_then_flags() {
        let path = temp_config(r#"{"votes": 25, "algorithm": "blake2b", "seed": 5}"#);
        let arg_path = path.display().to_string();
        let config =
            SimulationConfig::from_args(["--votes", "4", "--config", arg_path.as_str()]).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.votes, 4);
        assert_eq!(config.algorithm, HashAlgorithm::Blake2b);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.format, ReportFormat::Text);
    }

    #[test]
    fn test_bad_file() {
        let path = temp_config("{ not json");
        let err = SimulationConfig::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Decode(_)));

        let missing = std::env::temp_dir().join("vote_chain_missing_config.json");
        assert!(matches!(
            SimulationConfig::load(&missing),
            Err(ConfigError::Io(_))
        ));
    }
}
