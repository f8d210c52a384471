use crate::core::loader::{CatalogLoader, LoadReport};
use crate::domain::model::{CourseDetails, CourseSummary, RejectedRow};
use crate::domain::ports::{CatalogSource, SettingsProvider};
use crate::utils::error::{CatalogError, Result};

/// 一次操作期間的課程目錄。只能載入一次，之後唯讀。
#[derive(Debug, Default)]
pub struct CatalogSession {
    loaded: Option<LoadReport>,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn load<S, C>(&mut self, source: S, config: C) -> Result<&LoadReport>
    where
        S: CatalogSource,
        C: SettingsProvider,
    {
        if self.loaded.is_some() {
            return Err(CatalogError::AlreadyLoaded);
        }

        let report = CatalogLoader::new(source, config).load()?;
        let report: &LoadReport = self.loaded.insert(report);
        Ok(report)
    }

    pub fn report(&self) -> Result<&LoadReport> {
        self.loaded.as_ref().ok_or(CatalogError::NotLoaded)
    }

    pub fn rejected_rows(&self) -> Result<&[RejectedRow]> {
        Ok(&self.report()?.rejected_rows)
    }

    pub fn courses(&self) -> Result<Vec<CourseSummary>> {
        Ok(self.report()?.store.courses())
    }

    /// Looks up one course by ID.
    ///
    /// The query is trimmed first. IDs that never appeared in the file's
    /// first column are rejected without touching the store.
    pub fn lookup(&self, id: &str) -> Result<CourseDetails> {
        let report = self.report()?;
        let id = id.trim();

        if !report.known_ids.contains(id) {
            return Err(CatalogError::UnknownCourse { id: id.to_string() });
        }

        report
            .store
            .search(id)
            .map(CourseDetails::from)
            .ok_or_else(|| CatalogError::UnknownCourse { id: id.to_string() })
    }
}
