use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PRIMARY_URL: &str = "https://t2adewupae.execute-api.us-west-2.amazonaws.com";
pub const DEFAULT_SECONDARY_URL: &str = "http://localhost:3001";
pub const DEFAULT_ENDPOINT_PATH: &str = "/quiz";
pub const DEFAULT_LOCAL_FALLBACK_PATH: &str = "data/samplequizdata.json";
pub const DEFAULT_MANIFEST_PATH: &str = "data/manifest.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const MAX_TIMEOUT_MS: u64 = 600_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub quiz: QuizSourceConfig,
    pub catalog: CatalogConfig,
    pub logging: Option<LoggingConfig>,
}

/// 題目來源設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSourceConfig {
    pub primary_url: String,
    pub secondary_url: String,
    pub use_secondary: bool,
    pub endpoint_path: String,
    pub local_fallback_path: String,
    pub timeout_ms: u64,
}

impl Default for QuizSourceConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            secondary_url: DEFAULT_SECONDARY_URL.to_string(),
            use_secondary: false,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            local_fallback_path: DEFAULT_LOCAL_FALLBACK_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub manifest_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SMARTYQUEST_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        require("quiz.primary_url", &self.quiz.primary_url)?;
        validation::validate_url("quiz.primary_url", &self.quiz.primary_url)?;

        if self.quiz.use_secondary {
            require("quiz.secondary_url", &self.quiz.secondary_url)?;
            validation::validate_url("quiz.secondary_url", &self.quiz.secondary_url)?;
        }

        validation::validate_endpoint_path("quiz.endpoint_path", &self.quiz.endpoint_path)?;
        validation::validate_path("quiz.local_fallback_path", &self.quiz.local_fallback_path)?;
        validation::validate_file_extension(
            "quiz.local_fallback_path",
            &self.quiz.local_fallback_path,
            &["json"],
        )?;
        validation::validate_range("quiz.timeout_ms", self.quiz.timeout_ms, 1, MAX_TIMEOUT_MS)?;

        validation::validate_path("catalog.manifest_path", &self.catalog.manifest_path)?;
        validation::validate_file_extension(
            "catalog.manifest_path",
            &self.catalog.manifest_path,
            &["json"],
        )?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(ServiceError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn manifest_path(&self) -> &str {
        &self.catalog.manifest_path
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn verbose_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn primary_url(&self) -> &str {
        &self.quiz.primary_url
    }

    fn secondary_url(&self) -> &str {
        &self.quiz.secondary_url
    }

    fn use_secondary(&self) -> bool {
        self.quiz.use_secondary
    }

    fn endpoint_path(&self) -> &str {
        &self.quiz.endpoint_path
    }

    fn local_fallback_path(&self) -> &str {
        &self.quiz.local_fallback_path
    }

    fn timeout_ms(&self) -> u64 {
        self.quiz.timeout_ms
    }
}

/// 空白的 URL 視為未設定
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::MissingConfigError {
            field: field.to_string(),
        });
    }
    Ok(())
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
