use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, title: impl Into<String>, prerequisites: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prerequisites,
        }
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// 課程清單的一列 (ID, 名稱)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
}

/// 單一課程查詢結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub id: String,
    pub title: String,
    pub prerequisites: Vec<String>,
}

impl From<&Course> for CourseDetails {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            prerequisites: course.prerequisites.clone(),
        }
    }
}

/// 檔案第一欄出現過的所有課程代碼，用來驗證先修課程與查詢
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownIds {
    ids: HashSet<String>,
}

impl KnownIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// 第二輪解析時被拒絕的資料列 (非空欄位少於 2 個)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub field_count: usize,
}
