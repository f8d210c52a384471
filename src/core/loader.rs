use crate::core::store::CatalogStore;
use crate::domain::model::{Course, KnownIds, RejectedRow};
use crate::domain::ports::{CatalogSource, SettingsProvider};
use crate::utils::error::Result;
use crate::utils::validation::is_well_formed_course_id;
use csv::{ByteRecord, ReaderBuilder, Terminator};

/// 一行至少要有課程代碼與課程名稱
const MIN_FIELDS: usize = 2;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub store: CatalogStore,
    pub known_ids: KnownIds,
    pub rejected_rows: Vec<RejectedRow>,
    pub dropped_prerequisites: usize,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.store.len()
    }
}

/// Two-pass catalog loader.
///
/// Pass one collects every first-column value as the known-ID universe.
/// Pass two builds the courses, keeping only prerequisites found in that
/// universe, and inserts them into a fresh [`CatalogStore`].
pub struct CatalogLoader<S: CatalogSource, C: SettingsProvider> {
    source: S,
    config: C,
}

impl<S: CatalogSource, C: SettingsProvider> CatalogLoader<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }

    pub fn load(&self) -> Result<LoadReport> {
        let path = self.config.input_path();
        tracing::debug!("Reading course file: {}", path);

        // 讀不到檔案就整個失敗，不留下任何部分狀態
        let data = self.source.read_file(path)?;

        let known_ids = self.collect_known_ids(&data)?;
        tracing::debug!("Pass 1 found {} known course IDs", known_ids.len());

        let mut store =
            CatalogStore::with_options(self.config.bucket_count(), self.config.lookup_mode());
        let mut rejected_rows = Vec::new();
        let mut dropped_prerequisites = 0;

        let mut reader = self.reader(&data);
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            if is_blank_line(&record) {
                continue;
            }

            // 行號從檔案第一行 (標題) 起算
            let line = record.position().map_or(0, |pos| pos.line()) + 1;
            let fields = trimmed_fields(&record);

            if fields.len() < MIN_FIELDS {
                tracing::warn!(
                    "Row {} needs at least {} values, found {}. Row not read",
                    line,
                    MIN_FIELDS,
                    fields.len()
                );
                rejected_rows.push(RejectedRow {
                    line,
                    field_count: fields.len(),
                });
                continue;
            }

            let mut fields = fields.into_iter();
            let (Some(id), Some(title)) = (fields.next(), fields.next()) else {
                continue;
            };

            let (prerequisites, unknown): (Vec<String>, Vec<String>) =
                fields.partition(|candidate| known_ids.contains(candidate));

            if !unknown.is_empty() {
                tracing::debug!("{}: dropped unknown prerequisites {:?}", id, unknown);
                dropped_prerequisites += unknown.len();
            }

            if !is_well_formed_course_id(&id) {
                tracing::debug!(
                    "{} does not look like a course ID, stored in bucket {}",
                    id,
                    store.bucket_index(&id)
                );
            }

            store.insert(Course::new(id, title, prerequisites));
        }

        tracing::info!(
            "Loaded {} courses from {} ({} rows rejected)",
            store.len(),
            path,
            rejected_rows.len()
        );

        Ok(LoadReport {
            store,
            known_ids,
            rejected_rows,
            dropped_prerequisites,
        })
    }

    // 第一輪: 只看第一欄，不做 trim
    fn collect_known_ids(&self, data: &[u8]) -> Result<KnownIds> {
        let mut known_ids = KnownIds::new();
        let mut reader = self.reader(data);
        let mut record = ByteRecord::new();

        while reader.read_byte_record(&mut record)? {
            // 單欄位的列，行尾的 \r 會留在第一欄
            let first = match (record.get(0), record.len()) {
                (Some(field), 1) => field.strip_suffix(b"\r").unwrap_or(field),
                (field, _) => field.unwrap_or_default(),
            };
            if !first.is_empty() {
                known_ids.insert(String::from_utf8_lossy(first));
            }
        }

        Ok(known_ids)
    }

    /// 第一行一定是標題，不論內容 (空白行也算)，自己切掉後再交給 csv
    fn reader<'a>(&self, data: &'a [u8]) -> csv::Reader<&'a [u8]> {
        let body = match data.iter().position(|&byte| byte == b'\n') {
            Some(end) => &data[end + 1..],
            None => &[],
        };

        ReaderBuilder::new()
            .delimiter(self.config.delimiter())
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(body)
    }
}

// 只剩 \r 的行 (CRLF 檔案裡的空白行)
fn is_blank_line(record: &ByteRecord) -> bool {
    record.len() == 1 && matches!(record.get(0), Some(b"") | Some(b"\r"))
}

fn trim_field(field: &str) -> &str {
    field
        .trim_start_matches([' ', '\t'])
        .trim_end_matches([' ', '\t', '\r'])
}

fn trimmed_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .map(|field| trim_field(&field).to_string())
        .filter(|field| !field.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSettings;
    use crate::core::store::LookupMode;
    use crate::utils::error::CatalogError;
    use std::collections::HashMap;

    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
    }

    impl MemorySource {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), content.as_bytes().to_vec());
            Self { files }
        }
    }

    impl CatalogSource for MemorySource {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| CatalogError::SourceUnavailable {
                    path: path.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                })
        }
    }

    fn load(content: &str) -> LoadReport {
        let source = MemorySource::with_file("courses.csv", content);
        let settings = CatalogSettings::new("courses.csv");
        CatalogLoader::new(source, settings).load().unwrap()
    }

    #[test]
    fn test_trim_field() {
        assert_eq!(trim_field(" \tCSCI100 \r"), "CSCI100");
        assert_eq!(trim_field("Data Structures"), "Data Structures");
        assert_eq!(trim_field(" \t\r"), "");
    }

    #[test]
    fn test_round_trip_scenario() {
        let report = load("id,title\nCSCI100,Intro,\nCSCI200,DataStruct,CSCI100\n");

        let listed: Vec<(String, String)> = report
            .store
            .courses()
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("CSCI100".to_string(), "Intro".to_string()),
                ("CSCI200".to_string(), "DataStruct".to_string()),
            ]
        );

        let course = report.store.search("CSCI200").unwrap();
        assert_eq!(course.title, "DataStruct");
        assert_eq!(course.prerequisites, vec!["CSCI100"]);
        assert!(!report.known_ids.contains("CSCI999"));
        assert!(report.rejected_rows.is_empty());
    }

    #[test]
    fn test_short_row_is_rejected_and_loading_continues() {
        let report = load("id,title\nCSCI100,Intro\nCSCI150\nCSCI200,DataStruct,CSCI150\n");

        assert_eq!(report.loaded(), 2);
        assert_eq!(
            report.rejected_rows,
            vec![RejectedRow {
                line: 3,
                field_count: 1
            }]
        );
        assert!(report.store.search("CSCI150").is_none());

        // 被拒絕的列仍然算在已知代碼內
        assert!(report.known_ids.contains("CSCI150"));
        assert_eq!(
            report.store.search("CSCI200").unwrap().prerequisites,
            vec!["CSCI150"]
        );
    }

    #[test]
    fn test_unknown_prerequisite_is_dropped_not_rejected() {
        let report = load("id,title\nCSCI200,DataStruct,CSCI100,MATH999\nCSCI100,Intro\n");

        assert!(report.rejected_rows.is_empty());
        assert_eq!(report.dropped_prerequisites, 1);
        assert_eq!(
            report.store.search("CSCI200").unwrap().prerequisites,
            vec!["CSCI100"]
        );
    }

    #[test]
    fn test_crlf_and_padding_are_trimmed() {
        let report = load("id,title\r\nCSCI100, Intro \r\nCSCI200,\tData Structures\t, CSCI100\r\n");

        let course = report.store.search("CSCI200").unwrap();
        assert_eq!(course.title, "Data Structures");
        assert_eq!(course.prerequisites, vec!["CSCI100"]);
        assert_eq!(report.store.search("CSCI100").unwrap().title, "Intro");
    }

    #[test]
    fn test_untrimmed_known_ids_do_not_match_trimmed_prerequisites() {
        let report = load("id,title\n CSCI100,Intro\nCSCI200,DataStruct,CSCI100\n");

        assert!(report.known_ids.contains(" CSCI100"));
        assert!(report.store.search("CSCI200").unwrap().prerequisites.is_empty());
    }

    #[test]
    fn test_blank_lines_and_blank_ids_are_skipped() {
        let report = load("id,title\n\nCSCI100,Intro\n,Orphan Title,CSCI100\n\n");

        assert_eq!(report.known_ids.len(), 1);
        // ",Orphan Title,CSCI100" 去掉空欄位後仍有兩個值
        assert_eq!(report.loaded(), 2);
        assert!(report.rejected_rows.is_empty());
    }

    #[test]
    fn test_first_line_is_header_even_when_blank() {
        let report = load("\nCSCI100,Intro\nCSCI200,DataStruct,CSCI100\n");

        let ids: Vec<String> = report.store.courses().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["CSCI100", "CSCI200"]);
        assert!(report.known_ids.contains("CSCI100"));
        assert_eq!(
            report.store.search("CSCI200").unwrap().prerequisites,
            vec!["CSCI100"]
        );
        assert!(report.rejected_rows.is_empty());
    }

    #[test]
    fn test_rejected_row_numbers_count_the_header() {
        let report = load("\nCSCI100\n\nCSCI200,DataStruct\n");

        assert_eq!(
            report.rejected_rows,
            vec![RejectedRow {
                line: 2,
                field_count: 1
            }]
        );
    }

    #[test]
    fn test_carriage_return_inside_a_line_does_not_split_rows() {
        let report = load("id,title\nCSCI100,Intro\rCSCI200,DS\n");

        assert_eq!(report.loaded(), 1);
        assert!(!report.known_ids.contains("CSCI200"));
        let course = report.store.search("CSCI100").unwrap();
        assert_eq!(course.title, "Intro\rCSCI200");
    }

    #[test]
    fn test_crlf_single_field_rows_and_blank_lines() {
        let report = load("id,title\r\n\r\nCSCI150\r\nCSCI200,DataStruct,CSCI150\r\n");

        // 空白行不回報，單欄位列被拒絕但代碼仍然已知
        assert!(report.known_ids.contains("CSCI150"));
        assert_eq!(
            report.rejected_rows,
            vec![RejectedRow {
                line: 3,
                field_count: 1
            }]
        );
        assert_eq!(
            report.store.search("CSCI200").unwrap().prerequisites,
            vec!["CSCI150"]
        );
    }

    #[test]
    fn test_duplicates_and_self_references_are_kept() {
        let report = load("id,title\nCSCI100,Intro,CSCI100,CSCI100\n");

        assert_eq!(
            report.store.search("CSCI100").unwrap().prerequisites,
            vec!["CSCI100", "CSCI100"]
        );
    }

    #[test]
    fn test_header_only_file_loads_empty_store() {
        let report = load("id,title,prereq\n");
        assert!(report.store.is_empty());
        assert!(report.known_ids.is_empty());
    }

    #[test]
    fn test_settings_shape_the_store() {
        let source = MemorySource::with_file("courses.tsv", "id\ttitle\nCSCI100\tIntro\n");
        let settings = CatalogSettings {
            input_path: "courses.tsv".to_string(),
            bucket_count: 50,
            delimiter: b'\t',
            lookup_mode: LookupMode::BucketHead,
        };

        let report = CatalogLoader::new(source, settings).load().unwrap();
        assert_eq!(report.store.bucket_count(), 50);
        assert_eq!(report.store.lookup_mode(), LookupMode::BucketHead);
        assert_eq!(report.store.search("CSCI100").unwrap().title, "Intro");
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let source = MemorySource::with_file("courses.csv", "id,title\n");
        let settings = CatalogSettings::new("missing.csv");

        let err = CatalogLoader::new(source, settings).load().unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
    }
}
