use mus_core::game::round::MAX_PLAYERS;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS: usize = 4;
const MIN_PLAYERS: usize = 2;
const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    pub deals: DealConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: BenchConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(
            |source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
        )?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }

    /// Checks every block; run again after CLI overrides are applied.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.deals.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.validate()
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: expand_run_id(&self.outputs.jsonl, &self.run_id),
            summary_md: expand_run_id(&self.outputs.summary_md, &self.run_id),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    /// Master seed; every round derives its own deal seed from it. Defaults to 0.
    pub seed: Option<u64>,
    pub rounds: usize,
    #[serde(default = "default_players")]
    pub players: usize,
    /// Pass the mano to the next seat after every round instead of keeping seat 0.
    #[serde(default)]
    pub rotate_mano: bool,
}

impl DealConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.rounds == 0 {
            return Err(ValidationError::field(
                "deals.rounds",
                "at least one round must be dealt",
            ));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ValidationError::field(
                "deals.players",
                format!("a deck seats between {MIN_PLAYERS} and {MAX_PLAYERS} players"),
            ));
        }
        Ok(())
    }
}

fn default_players() -> usize {
    DEFAULT_PLAYERS
}

/// Output paths; `{run_id}` is replaced by the run identifier.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let fields = [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ];
        for (field, template) in fields {
            if template.trim().is_empty() || expand_run_id(template, run_id).file_name().is_none()
            {
                return Err(ValidationError::field(field, "expected a file path"));
            }
        }
        if self.jsonl == self.summary_md {
            return Err(ValidationError::field(
                "outputs.summary_md",
                "must differ from outputs.jsonl",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Write JSON telemetry beside the summary. Off unless asked for.
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    /// Parses `tracing_level` ("trace" through "error", any case).
    pub fn level(&self) -> Result<Level, ValidationError> {
        self.tracing_level.trim().parse::<Level>().map_err(|_| {
            ValidationError::field(
                "logging.tracing_level",
                format!("unknown level '{}'", self.tracing_level),
            )
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.level().map(|_| ())
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if run_id.is_empty() || !run_id.chars().all(allowed) {
        return Err(ValidationError::field(
            "run_id",
            "use ASCII letters, digits, '.', '_' or '-' (at least one)",
        ));
    }
    Ok(())
}

fn expand_run_id(template: &str, run_id: &str) -> PathBuf {
    PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, run_id))
}

/// Output paths with `{run_id}` expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

impl ResolvedOutputs {
    /// Structured telemetry lands next to the summary.
    pub fn telemetry_dir(&self) -> PathBuf {
        self.summary_md
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn telemetry_path(&self) -> PathBuf {
        self.telemetry_dir().join("telemetry.jsonl")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read bench config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bench config {} is not valid YAML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("bench config {} rejected: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
