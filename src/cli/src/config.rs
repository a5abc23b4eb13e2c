//! Configuration for the wallet shell.
//!
//! Settings are merged from four sources, strongest first: command
//! line flags, environment variables, an optional JSON config file,
//! and built-in defaults. The merged value is validated once and then
//! passed read-only into every command.

use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The default public endpoint. Using it without an API key is
/// refused at startup.
pub const TONCENTER_API_ENDPOINT: &str = "https://toncenter.com/api/v2/jsonRPC";

/// Config file consulted when no `--config` flag is given.
const DEFAULT_CONFIG_FILE: &str = "config.json";

const API_KEY_ENV: &str = "TON_CLI_API_KEY";
const NODE_ENV: &str = "TON_CLI_NODE";
const DEBUG_ENV: &str = "TRON_CLI_DEBUG";

/// Errors that can occur while loading configuration. All of them are
/// fatal: the shell never starts on a bad configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Error when the config file cannot be read.
    FileError(std::io::Error),

    /// Error when the config file is not valid JSON or carries
    /// unknown keys.
    ParseError(serde_json::Error),

    /// Error when the node endpoint is not an absolute http(s) URL.
    InvalidNode(String),

    /// Error when an environment variable holds an unrecognized value.
    InvalidEnvValue(String, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileError(e) => write!(f, "Config file error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::InvalidNode(node) => write!(f, "Invalid node endpoint: {}", node),
            ConfigError::InvalidEnvValue(var, value) => {
                write!(f, "Invalid value for {}: {}", var, value)
            }
        }
    }
}

impl StdError for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::FileError(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::ParseError(error)
    }
}

/// The validated settings shared by all commands.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// toncenter.com API key, if any.
    pub api_key: Option<String>,
    /// Node endpoint (full URL, including protocol, port and path).
    pub node: String,
    /// Whether debug logging is enabled.
    pub debug: bool,
}

/// Values taken from the command line, applied over every other
/// source.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub node: Option<String>,
    pub debug: bool,
}

/// On-disk layout of the optional config file. Unknown keys are
/// rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct FileConfig {
    api_key: Option<String>,
    node: Option<String>,
    debug: Option<bool>,
}

impl FileConfig {
    /// Reads and parses a config file.
    fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Raw values read from the process environment.
#[derive(Debug, Default)]
struct EnvConfig {
    api_key: Option<String>,
    node: Option<String>,
    debug: Option<String>,
}

impl EnvConfig {
    fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            node: std::env::var(NODE_ENV).ok(),
            debug: std::env::var(DEBUG_ENV).ok(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from all sources.
    ///
    /// A config path given explicitly must exist; the default
    /// `config.json` is only consulted when present.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => FileConfig::read(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    FileConfig::read(default)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::from_sources(file, EnvConfig::from_env(), overrides)
    }

    /// Merges the three explicit sources over the defaults and
    /// validates the result.
    fn from_sources(
        file: FileConfig,
        env: EnvConfig,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let api_key = overrides.api_key.or(env.api_key).or(file.api_key);

        let node = overrides
            .node
            .or(env.node)
            .or(file.node)
            .unwrap_or_else(|| TONCENTER_API_ENDPOINT.to_string());

        // The --debug flag can only force debug on; its absence falls
        // through to the weaker sources.
        let debug = if overrides.debug {
            true
        } else if let Some(raw) = env.debug {
            parse_bool(&raw).ok_or(ConfigError::InvalidEnvValue(DEBUG_ENV.to_string(), raw))?
        } else {
            file.debug.unwrap_or(false)
        };

        let config = Self {
            api_key,
            node,
            debug,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.node)
            .map_err(|_| ConfigError::InvalidNode(self.node.clone()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidNode(self.node.clone()));
        }
        Ok(())
    }

    /// Whether the configuration points at the public endpoint without
    /// an API key, in which case the shell refuses to start.
    pub fn needs_api_key(&self) -> bool {
        self.api_key.is_none() && self.node == TONCENTER_API_ENDPOINT
    }
}

/// Parses a boolean environment value. Unrecognized tokens are an
/// error rather than silently false.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config =
            CliConfig::from_sources(FileConfig::default(), EnvConfig::default(), Overrides::default())
                .unwrap();
        assert_eq!(config.node, TONCENTER_API_ENDPOINT);
        assert_eq!(config.api_key, None);
        assert!(!config.debug);
        assert!(config.needs_api_key());
    }

    #[test]
    fn test_file_values_apply() {
        let file = write_config(r#"{"apiKey": "abc", "node": "http://localhost:8081/jsonRPC"}"#);
        let file = FileConfig::read(file.path()).unwrap();
        let config = CliConfig::from_sources(file, EnvConfig::default(), Overrides::default()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.node, "http://localhost:8081/jsonRPC");
        assert!(!config.needs_api_key());
    }

    #[test]
    fn test_unknown_file_keys_rejected() {
        let file = write_config(r#"{"apiKey": "abc", "nodeUrl": "oops"}"#);
        assert!(matches!(
            FileConfig::read(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_fatal() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/config.json")), Overrides::default());
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_beats_file() {
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            node: Some("http://file:1/jsonRPC".to_string()),
            debug: Some(false),
        };
        let env = EnvConfig {
            api_key: Some("from-env".to_string()),
            node: Some("http://env:2/jsonRPC".to_string()),
            debug: Some("true".to_string()),
        };
        let config = CliConfig::from_sources(file, env, Overrides::default()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.node, "http://env:2/jsonRPC");
        assert!(config.debug);
    }

    #[test]
    fn test_flag_beats_env() {
        let env = EnvConfig {
            api_key: Some("from-env".to_string()),
            node: Some("http://env:2/jsonRPC".to_string()),
            debug: None,
        };
        let overrides = Overrides {
            api_key: Some("from-flag".to_string()),
            node: Some("http://flag:3/jsonRPC".to_string()),
            debug: true,
        };
        let config = CliConfig::from_sources(FileConfig::default(), env, overrides).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.node, "http://flag:3/jsonRPC");
        assert!(config.debug);
    }

    #[test]
    fn test_bad_debug_env_rejected() {
        let env = EnvConfig {
            debug: Some("maybe".to_string()),
            ..EnvConfig::default()
        };
        let result = CliConfig::from_sources(FileConfig::default(), env, Overrides::default());
        assert!(matches!(result, Err(ConfigError::InvalidEnvValue(_, _))));
    }

    #[test]
    fn test_bad_node_rejected() {
        let overrides = Overrides {
            node: Some("not a url".to_string()),
            ..Overrides::default()
        };
        let result = CliConfig::from_sources(FileConfig::default(), EnvConfig::default(), overrides);
        assert!(matches!(result, Err(ConfigError::InvalidNode(_))));

        let overrides = Overrides {
            node: Some("ftp://example.com/jsonRPC".to_string()),
            ..Overrides::default()
        };
        let result = CliConfig::from_sources(FileConfig::default(), EnvConfig::default(), overrides);
        assert!(matches!(result, Err(ConfigError::InvalidNode(_))));
    }

    #[test]
    fn test_needs_api_key_matrix() {
        let with_key = CliConfig {
            api_key: Some("abc".to_string()),
            node: TONCENTER_API_ENDPOINT.to_string(),
            debug: false,
        };
        assert!(!with_key.needs_api_key());

        let custom_node = CliConfig {
            api_key: None,
            node: "http://localhost:8081/jsonRPC".to_string(),
            debug: false,
        };
        assert!(!custom_node.needs_api_key());
    }

    #[test]
    #[serial]
    fn test_load_reads_environment() {
        std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var(NODE_ENV, "http://localhost:9000/jsonRPC");
        std::env::remove_var(DEBUG_ENV);

        let config = CliConfig::load(None, Overrides::default()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.node, "http://localhost:9000/jsonRPC");

        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(NODE_ENV);
    }
}
