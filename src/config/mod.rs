pub mod local;
pub mod toml_config;

use crate::core::{LookupMode, SettingsProvider, DEFAULT_BUCKET_COUNT};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};

pub const DEFAULT_INPUT_PATH: &str = "ABCU_Courses.csv";

/// 合併 TOML 檔案與命令列參數後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub input_path: String,
    pub bucket_count: usize,
    pub delimiter: u8,
    pub lookup_mode: LookupMode,
}

impl CatalogSettings {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            bucket_count: DEFAULT_BUCKET_COUNT,
            delimiter: b',',
            lookup_mode: LookupMode::default(),
        }
    }
}

impl SettingsProvider for CatalogSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn lookup_mode(&self) -> LookupMode {
        self.lookup_mode
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        validate_path("catalog.input_path", &self.input_path)?;
        validate_positive_number("catalog.bucket_count", self.bucket_count, 1)?;
        crate::utils::validation::validate_delimiter("catalog.delimiter", self.delimiter as char)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    pub verbose: bool,
    pub level: Option<String>,
    pub format: LogFormat,
}

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use super::{CatalogSettings, LoggingSettings};
    use crate::config::toml_config::TomlConfig;
    use crate::core::LookupMode;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{validate_delimiter, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "course-catalog")]
    #[command(about = "Load a course file and browse courses and their prerequisites")]
    pub struct CliConfig {
        /// Course file to load (default: ABCU_Courses.csv)
        #[arg(short, long)]
        pub input: Option<String>,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Number of hash table buckets
        #[arg(long)]
        pub buckets: Option<usize>,

        /// Field delimiter of the course file
        #[arg(long)]
        pub delimiter: Option<char>,

        /// exact or bucket-head
        #[arg(long)]
        pub lookup_mode: Option<LookupMode>,

        /// compact or json
        #[arg(long)]
        pub log_format: Option<LogFormat>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Print every course sorted by ID
        List {
            #[arg(long)]
            json: bool,
        },
        /// Print one course and its prerequisites
        Show {
            id: String,
            #[arg(long)]
            json: bool,
        },
    }

    impl CliConfig {
        /// 先讀 TOML 檔 (若有)，再套用命令列覆蓋設定
        pub fn resolve(&self) -> Result<(CatalogSettings, LoggingSettings)> {
            let (mut settings, mut logging) = match &self.config {
                Some(path) => {
                    let file_config = TomlConfig::from_file(path)?;
                    file_config.validate()?;
                    (file_config.catalog_settings()?, file_config.logging_settings()?)
                }
                None => (CatalogSettings::default(), LoggingSettings::default()),
            };

            if let Some(input) = &self.input {
                settings.input_path = input.clone();
            }
            if let Some(buckets) = self.buckets {
                settings.bucket_count = buckets;
            }
            if let Some(delimiter) = self.delimiter {
                settings.delimiter = validate_delimiter("--delimiter", delimiter)?;
            }
            if let Some(mode) = self.lookup_mode {
                settings.lookup_mode = mode;
            }
            if let Some(format) = self.log_format {
                logging.format = format;
            }
            logging.verbose |= self.verbose;

            settings.validate()?;
            Ok((settings, logging))
        }
    }

}
