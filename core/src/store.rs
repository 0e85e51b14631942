//! JSON file persistence for the seat map.
//!
//! RULE: Only store.rs touches the backing file.
//! The hall hands over seat records; it never opens the file itself.

use crate::{
    error::{HallError, HallResult},
    seat::SeatRecord,
    types::SeatCode,
};
use serde::{ser::Serializer, Serialize};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub struct HallStore {
    path: PathBuf,
}

impl HallStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record keyed by seat code.
    ///
    /// Returns `Ok(None)` when no store exists yet. Anything unreadable or
    /// unparseable comes back as `StoreCorrupt`.
    pub fn read(&self) -> HallResult<Option<BTreeMap<SeatCode, SeatRecord>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.corrupt(e.to_string())),
        };
        let records = serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        Ok(Some(records))
    }

    /// Rewrite the whole store. Records are written in the order given.
    ///
    /// The new content lands in a sibling temp file first and is renamed
    /// over the target, so a failed write leaves the previous store intact.
    pub fn write(&self, records: &[SeatRecord]) -> HallResult<()> {
        let json = serde_json::to_string_pretty(&OrderedSeats(records))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persistence(parent, e))?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| self.persistence(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.persistence(&self.path, e));
        }

        log::debug!("store: saved {} seats to {}", records.len(), self.path.display());
        Ok(())
    }

    pub(crate) fn corrupt(&self, reason: impl Into<String>) -> HallError {
        HallError::StoreCorrupt {
            path:   self.path.display().to_string(),
            reason: reason.into(),
        }
    }

    fn persistence(&self, path: &Path, source: std::io::Error) -> HallError {
        HallError::Persistence { path: path.display().to_string(), source }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Serializes records as a JSON object keyed by seat code, preserving order.
struct OrderedSeats<'a>(&'a [SeatRecord]);

impl Serialize for OrderedSeats<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|record| (&record.id, record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, booked_by: Option<&str>) -> SeatRecord {
        SeatRecord {
            id:        id.into(),
            price:     12.0,
            is_vip:    false,
            is_booked: booked_by.is_some(),
            booked_by: booked_by.map(str::to_string),
        }
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = HallStore::new(dir.path().join("absent.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn written_json_keeps_row_major_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = HallStore::new(dir.path().join("hall.json"));
        let records = vec![record("A2", None), record("A10", None), record("B1", Some("Ann"))];
        store.write(&records).unwrap();

        let json = fs::read_to_string(store.path()).unwrap();
        let a2 = json.find("\"A2\"").unwrap();
        let a10 = json.find("\"A10\"").unwrap();
        let b1 = json.find("\"B1\"").unwrap();
        assert!(a2 < a10 && a10 < b1, "entries out of order:\n{json}");
        assert!(json.contains("\"booked_by\": null"), "unbooked seat should store null:\n{json}");
        assert!(!store.temp_path().exists(), "temp file should be renamed away");
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = HallStore::new(dir.path().join("nested/deeper/hall.json"));
        store.write(&[record("A1", None)]).unwrap();
        let read = store.read().unwrap().unwrap();
        assert_eq!(read["A1"], record("A1", None));
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked.json");
        fs::create_dir_all(path.join("inner")).unwrap();
        let store = HallStore::new(&path);

        let err = store.write(&[record("A1", Some("Alice"))]).unwrap_err();
        assert!(matches!(err, HallError::Persistence { .. }), "got {err:?}");
        assert!(!store.temp_path().exists(), "temp file should not outlive a failed save");
        assert!(path.join("inner").is_dir(), "blocking directory should be untouched");
    }

    #[test]
    fn garbage_reads_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hall.json");
        fs::write(&path, "{ not json").unwrap();
        let err = HallStore::new(&path).read().unwrap_err();
        assert!(matches!(err, HallError::StoreCorrupt { .. }), "got {err:?}");
    }
}
