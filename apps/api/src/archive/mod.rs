//! Archive Store — flat-file store of generated analysis reports.
//!
//! One markdown file per report, named by creation timestamp. Files are
//! immutable after creation and accumulate indefinitely; the directory
//! listing, sorted descending by name, is the whole index.

pub mod handlers;

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use crate::errors::AppError;

const FILE_PREFIX: &str = "analysis_report_";
const FILE_SUFFIX: &str = ".md";

#[derive(Debug, Clone)]
pub struct ArchiveStore {
    dir: PathBuf,
}

impl ArchiveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `report` to a new `analysis_report_<YYYY-MM-DD_HH-MM-SS>.md`
    /// file and returns the filename. A second save within the same second
    /// gets a numeric suffix instead of overwriting the first.
    pub fn save(&self, report: &str) -> Result<String, AppError> {
        fs::create_dir_all(&self.dir)?;

        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let base = format!("{FILE_PREFIX}{stamp}");
        let mut name = format!("{base}{FILE_SUFFIX}");
        let mut n = 1u32;
        while self.dir.join(&name).exists() {
            n += 1;
            name = format!("{base}-{n}{FILE_SUFFIX}");
        }

        fs::write(self.dir.join(&name), report)?;
        debug!("Saved report to {name}");
        Ok(name)
    }

    /// All archive entries, newest first. The filename embeds the timestamp,
    /// so a descending lexicographic sort is a descending time sort.
    pub fn list(&self) -> Result<Vec<String>, AppError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX))
            .collect();

        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Loads one archived report by filename.
    pub fn load(&self, name: &str) -> Result<String, AppError> {
        // Filenames come from the URL; never let them escape the archive dir
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::Validation(format!("Invalid report name '{name}'")));
        }

        match fs::read_to_string(self.dir.join(name)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Report '{name}' not found")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ArchiveStore) {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = store();
        let report = "# Analysis\n\nSome markdown body.";
        let name = store.save(report).unwrap();
        assert!(name.starts_with(FILE_PREFIX));
        assert!(name.ends_with(FILE_SUFFIX));
        assert_eq!(store.load(&name).unwrap(), report);
    }

    #[test]
    fn test_same_second_saves_do_not_overwrite() {
        let (_dir, store) = store();
        let first = store.save("first").unwrap();
        let second = store.save("second").unwrap();
        assert_ne!(first, second);
        assert_eq!(store.load(&first).unwrap(), "first");
        assert_eq!(store.load(&second).unwrap(), "second");
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_list_is_sorted_descending() {
        let (dir, store) = store();
        for stamp in [
            "2024-01-02_10-00-00",
            "2024-03-01_09-30-00",
            "2024-01-02_10-00-01",
        ] {
            std::fs::write(
                dir.path().join(format!("{FILE_PREFIX}{stamp}{FILE_SUFFIX}")),
                "body",
            )
            .unwrap();
        }

        let names = store.list().unwrap();
        assert_eq!(
            names,
            vec![
                "analysis_report_2024-03-01_09-30-00.md",
                "analysis_report_2024-01-02_10-00-01.md",
                "analysis_report_2024-01-02_10-00-00.md",
            ]
        );
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("notes.txt"), "not a report").unwrap();
        store.save("real report").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_on_missing_directory_is_empty() {
        let store = ArchiveStore::new("/nonexistent/archive/dir");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_report_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("analysis_report_2024-01-01_00-00-00.md"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("../secrets.md"),
            Err(AppError::Validation(_))
        ));
    }
}
