use crate::core::CatalogSource;
use crate::utils::error::{CatalogError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 從本機檔案系統讀取課程檔案。相對路徑以 `base_path` 為起點。
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    base_path: Option<PathBuf>,
}

impl LocalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => Path::new(path).to_path_buf(),
        }
    }
}

impl CatalogSource for LocalSource {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Opening {}", full_path.display());

        fs::read(&full_path).map_err(|source| CatalogError::SourceUnavailable {
            path: full_path.display().to_string(),
            source,
        })
    }
}
