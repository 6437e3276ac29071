//! Record storage
//!
//! The analytics modules never load records themselves; callers hand them a
//! snapshot obtained from a [`RecordStore`]. Snapshots come back newest first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::Result;
use crate::filter;
use crate::models::{ExpenseRecord, FilterOption};

/// Source of record snapshots
pub trait RecordStore {
    /// All records, sorted by `created_at` descending
    fn fetch_all(&self) -> Result<Vec<ExpenseRecord>>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ExpenseRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<ExpenseRecord>> {
        let mut records = self.records.clone();
        filter::sort(FilterOption::Newest, &mut records);
        Ok(records)
    }
}

/// Records kept as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in file order. A missing or blank file is an empty list.
    fn read(&self) -> Result<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Record file not found, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the file contents with `records`
    pub fn save_all(&self, records: &[ExpenseRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;

        debug!(path = %self.path.display(), records = records.len(), "Saved records");
        Ok(())
    }

    /// Append a record, assigning an id if it has none. Returns the stored record.
    pub fn append(&self, mut record: ExpenseRecord) -> Result<ExpenseRecord> {
        let mut records = self.read()?;

        if record.id.is_none() {
            record.id = Some(next_id(records.len()));
        }

        records.push(record.clone());
        self.save_all(&records)?;

        info!(id = record.id.as_deref().unwrap_or(""), "Saved record");
        Ok(record)
    }
}

impl RecordStore for JsonFileStore {
    fn fetch_all(&self) -> Result<Vec<ExpenseRecord>> {
        let mut records = self.read()?;
        filter::sort(FilterOption::Newest, &mut records);
        debug!(path = %self.path.display(), records = records.len(), "Loaded records");
        Ok(records)
    }
}

/// `rec-<millis>-<n>`, where n is the number of records already stored
fn next_id(existing: usize) -> String {
    format!("rec-{}-{}", Utc::now().timestamp_millis(), existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn at(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_memory_store_newest_first() {
        let store = MemoryStore::new(vec![
            ExpenseRecord::from_amounts(1.0, 0.0, 1).with_id("old").with_created_at(at(1)),
            ExpenseRecord::from_amounts(2.0, 0.0, 1).with_id("undated"),
            ExpenseRecord::from_amounts(3.0, 0.0, 1).with_id("new").with_created_at(at(9)),
        ]);
        let ids: Vec<_> = store
            .fetch_all()
            .unwrap()
            .into_iter()
            .filter_map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "  \n").unwrap();
        assert!(JsonFileStore::new(path).fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_fetch_sorted() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("records.json"));

        let base = at(10);
        let records = vec![
            ExpenseRecord::from_amounts(10.0, 1.0, 1).with_id("a").with_created_at(base - Duration::days(2)),
            ExpenseRecord::from_amounts(20.0, 2.0, 2).with_id("b").with_created_at(base),
        ];
        store.save_all(&records).unwrap();

        let loaded = store.fetch_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id.as_deref(), Some("b"));
        assert_eq!(loaded[0], records[1]);
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("records.json"));

        let first = store.append(ExpenseRecord::from_amounts(10.0, 0.0, 1)).unwrap();
        let second = store.append(ExpenseRecord::from_amounts(20.0, 0.0, 1)).unwrap();
        let kept = store
            .append(ExpenseRecord::from_amounts(30.0, 0.0, 1).with_id("mine"))
            .unwrap();

        let first_id = first.id.unwrap();
        let second_id = second.id.unwrap();
        assert!(first_id.starts_with("rec-"));
        assert!(first_id.ends_with("-0"));
        assert!(second_id.ends_with("-1"));
        assert_ne!(first_id, second_id);
        assert_eq!(kept.id.as_deref(), Some("mine"));
        assert_eq!(store.fetch_all().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(path).fetch_all().is_err());
    }

    #[test]
    fn test_reads_camel_case_records_with_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[{"billAmount": 100.0, "tipAmount": 10.0, "totalAmount": 110.0,
                 "amountPerPerson": 55.0, "splitCount": 2, "tipLabel": "10%",
                 "categoryId": "food"}]"#,
        )
        .unwrap();

        let records = JsonFileStore::new(path).fetch_all().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].created_at.is_none());
        assert!(records[0].id.is_none());
        assert_eq!(records[0].amount_per_person, 55.0);
    }
}
