use crate::domain::model::{Course, CourseSummary};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUCKET_COUNT: usize = 27;

/// 課程代碼中數字部分的位置: 4 個字母之後的 3 個字元
const KEY_OFFSET: usize = 4;
const KEY_WIDTH: usize = 3;

/// 同一個 bucket 內多筆課程時，點查詢與列舉的行為
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupMode {
    /// 掃描整條 chain 並比對課程代碼；列舉包含 chain 成員
    #[default]
    Exact,
    /// 相容舊行為: 只看 bucket 的第一筆，不比對代碼；列舉只含第一筆
    BucketHead,
}

impl std::str::FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "bucket-head" | "bucket_head" | "legacy" => Ok(Self::BucketHead),
            other => Err(format!(
                "unknown lookup mode '{}', expected exact or bucket-head",
                other
            )),
        }
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::BucketHead => f.write_str("bucket-head"),
        }
    }
}

#[derive(Debug, Clone)]
struct Bucket {
    key: usize,
    head: Course,
    overflow: Vec<Course>,
}

impl Bucket {
    fn iter(&self) -> impl Iterator<Item = &Course> {
        std::iter::once(&self.head).chain(self.overflow.iter())
    }
}

/// Fixed-size chained hash table keyed by the numeric part of a course ID.
///
/// The table never resizes. Every record is owned by its bucket, either as
/// the head or in the bucket's overflow chain, and duplicates are not
/// detected: two rows with the same ID both end up stored.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    buckets: Vec<Option<Bucket>>,
    mode: LookupMode,
    len: usize,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self::with_options(bucket_count, LookupMode::default())
    }

    pub fn with_options(bucket_count: usize, mode: LookupMode) -> Self {
        assert!(bucket_count > 0, "catalog store needs at least one bucket");
        Self {
            buckets: vec![None; bucket_count],
            mode,
            len: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn lookup_mode(&self) -> LookupMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket index for a course ID: the three characters after the subject
    /// prefix, read as an integer, modulo the bucket count.
    ///
    /// IDs without parseable digits there map to key 0. This is deliberate:
    /// malformed IDs still load and simply share bucket 0.
    pub fn bucket_index(&self, id: &str) -> usize {
        numeric_key(id) as usize % self.buckets.len()
    }

    pub fn insert(&mut self, course: Course) {
        let index = self.bucket_index(&course.id);
        tracing::trace!("Inserting {} into bucket {}", course.id, index);

        if let Some(bucket) = &mut self.buckets[index] {
            bucket.overflow.push(course);
        } else {
            self.buckets[index] = Some(Bucket {
                key: index,
                head: course,
                overflow: Vec::new(),
            });
        }
        self.len += 1;
    }

    pub fn search(&self, id: &str) -> Option<&Course> {
        let index = self.bucket_index(id);
        let bucket = self.buckets[index].as_ref()?;
        debug_assert_eq!(bucket.key, index);

        match self.mode {
            LookupMode::Exact => bucket.iter().find(|course| course.id == id),
            LookupMode::BucketHead => Some(&bucket.head),
        }
    }

    /// 依課程代碼排序的 (ID, 名稱) 清單，每次呼叫重新計算
    pub fn courses(&self) -> Vec<CourseSummary> {
        let occupied = self.buckets.iter().flatten();

        let mut courses: Vec<CourseSummary> = match self.mode {
            LookupMode::Exact => occupied
                .flat_map(|bucket| bucket.iter())
                .map(Course::summary)
                .collect(),
            LookupMode::BucketHead => occupied.map(|bucket| bucket.head.summary()).collect(),
        };

        courses.sort_by(|a, b| a.id.cmp(&b.id));
        courses
    }

    /// 每個 bucket 的筆數 (含 chain)
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|slot| slot.as_ref().map_or(0, |bucket| 1 + bucket.overflow.len()))
            .collect()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

// 類似 C 的 atoi: 只取開頭連續的數字，其餘忽略，解析不到就是 0
fn numeric_key(id: &str) -> u32 {
    id.chars()
        .skip(KEY_OFFSET)
        .take(KEY_WIDTH)
        .map_while(|c| c.to_digit(10))
        .fold(0, |acc, digit| acc * 10 + digit)
}
