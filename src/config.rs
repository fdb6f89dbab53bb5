use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::validation::{DEFAULT_PHONE_PATTERN, HoursPolicy, PhonePattern, ValidationRules};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Mirror log lines to stdout (JSON when `use_json`)
    #[serde(default = "default_log_stdout")]
    pub log_stdout: bool,
    /// Which collection this process serves
    pub service: ServiceKind,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_log_stdout() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Tea,
    Restaurant,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Tea => "tea",
            Self::Restaurant => "restaurant",
        }
    }

    pub fn welcome(self) -> &'static str {
        match self {
            Self::Tea => "Welcome to tea house",
            Self::Restaurant => "Welcome to the restaurant directory",
        }
    }

    /// Page size when the client sends no `limit`
    pub fn default_page_limit(self) -> u64 {
        match self {
            Self::Tea => 100,
            Self::Restaurant => 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Required when `backend` is `postgres`
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            postgres_url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaginationConfig {
    /// Overrides the per-service default page size
    #[serde(default)]
    pub default_limit: Option<u64>,
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

fn default_max_limit() -> u64 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_limit: default_max_limit(),
        }
    }
}

impl PaginationConfig {
    pub fn default_limit_for(&self, service: ServiceKind) -> u64 {
        self.default_limit
            .unwrap_or_else(|| service.default_page_limit())
            .clamp(1, self.max_limit.max(1))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,
    #[serde(default)]
    pub closing_time_policy: HoursPolicy,
}

fn default_phone_pattern() -> String {
    DEFAULT_PHONE_PATTERN.to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            phone_pattern: default_phone_pattern(),
            closing_time_policy: HoursPolicy::default(),
        }
    }
}

impl ValidationConfig {
    /// Compile the configured phone pattern into a rule set
    pub fn rules(&self) -> anyhow::Result<ValidationRules> {
        let phone = PhonePattern::new(&self.phone_pattern)
            .with_context(|| format!("Invalid phone_pattern: {}", self.phone_pattern))?;
        Ok(ValidationRules::new(phone, self.closing_time_policy))
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> anyhow::Result<Self> {
        Self::load_from(format!("config/{}.yaml", env))
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", path.display()))
    }
}
