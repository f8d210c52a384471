use crate::config::{CatalogSettings, LoggingSettings};
use crate::core::LookupMode;
use crate::utils::error::{CatalogError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_delimiter, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub input_path: Option<String>,
    pub bucket_count: Option<usize>,
    pub delimiter: Option<String>,
    pub lookup_mode: Option<LookupMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| CatalogError::ConfigError {
            message: format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_FILE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 單一字元的分隔符號
    fn delimiter(&self) -> Result<Option<u8>> {
        let Some(raw) = &self.catalog.delimiter else {
            return Ok(None);
        };

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => validate_delimiter("catalog.delimiter", c).map(Some),
            _ => Err(CatalogError::InvalidConfigValueError {
                field: "catalog.delimiter".to_string(),
                value: raw.clone(),
                reason: "Delimiter must be exactly one character".to_string(),
            }),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.catalog_settings()?.validate()?;
        self.logging_settings()?;
        Ok(())
    }

    pub fn catalog_settings(&self) -> Result<CatalogSettings> {
        let defaults = CatalogSettings::default();

        Ok(CatalogSettings {
            input_path: self
                .catalog
                .input_path
                .clone()
                .unwrap_or(defaults.input_path),
            bucket_count: self.catalog.bucket_count.unwrap_or(defaults.bucket_count),
            delimiter: self.delimiter()?.unwrap_or(defaults.delimiter),
            lookup_mode: self.catalog.lookup_mode.unwrap_or(defaults.lookup_mode),
        })
    }

    pub fn logging_settings(&self) -> Result<LoggingSettings> {
        let Some(logging) = &self.logging else {
            return Ok(LoggingSettings::default());
        };

        let format = match &logging.format {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| CatalogError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: raw.clone(),
                    reason,
                })?,
            None => LogFormat::default(),
        };

        Ok(LoggingSettings {
            verbose: logging.verbose.unwrap_or(false),
            level: logging.level.clone(),
            format,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
