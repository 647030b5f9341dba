use crate::core::Storage;
use crate::utils::error::{Result, TallyError};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// A directory on the local file system. Listing is non-recursive.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, name: &str) -> PathBuf {
        Path::new(&self.base_path).join(name)
    }
}

impl Storage for LocalStorage {
    fn location(&self) -> &str {
        &self.base_path
    }

    fn list_files(&self, extension: &str) -> Result<Vec<String>> {
        let listing_error = |source| TallyError::ListingError {
            location: self.base_path.clone(),
            source,
        };

        // A missing path or a plain file has no entries, same as a glob over it.
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                tracing::debug!("{} is not a directory: {}", self.base_path, e);
                return Ok(Vec::new());
            }
            Err(e) if Path::new(&self.base_path).is_file() => {
                tracing::debug!("{} is a file: {}", self.base_path, e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(listing_error(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(listing_error)?;
            let path = entry.path();
            let matches = path.extension().and_then(|ext| ext.to_str()) == Some(extension);
            if !matches || !path.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        Ok(names)
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let file = File::open(self.full_path(name)).map_err(|source| TallyError::FileIoError {
            file: name.to_string(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_csv_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "Severity\n").unwrap();
        fs::write(dir.path().join("b.CSV"), "Severity\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("nested.csv")).unwrap();
        fs::write(dir.path().join("nested.csv").join("c.csv"), "Severity\n").unwrap();

        let storage = LocalStorage::new(dir.path().to_string_lossy().to_string());
        let names = storage.list_files("csv").unwrap();

        assert_eq!(names, vec!["a.csv".to_string()]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("absent").to_string_lossy().to_string());
        assert!(storage.list_files("csv").unwrap().is_empty());
    }

    #[test]
    fn test_file_path_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("findings.txt");
        fs::write(&file, "Severity\nhigh\n").unwrap();

        let storage = LocalStorage::new(file.to_string_lossy().to_string());
        assert!(storage.list_files("csv").unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_file_is_file_scoped() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy().to_string());
        let err = storage.open("gone.csv").err().unwrap();
        assert!(err.is_file_scoped());
    }
}
