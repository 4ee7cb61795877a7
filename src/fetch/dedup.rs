use std::collections::HashSet;
use std::path::Path;

use tokio::fs;

/// In-memory index of content hashes for already-saved images.
///
/// MD5 only guards against accidentally re-downloading identical bytes; it
/// is not an integrity or security check. The index lives for the process
/// and is rebuilt from the output directory on the next run.
#[derive(Debug, Default)]
pub struct DedupIndex {
    hashes: HashSet<[u8; 16]>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash every regular file already present in `dir`.
    ///
    /// Unreadable entries are skipped so a single bad file cannot block
    /// startup; a missing directory yields an empty index.
    pub async fn from_directory(dir: &Path) -> Self {
        let mut index = Self::new();

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(_) => return index,
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => {}
                _ => continue,
            }
            let path = entry.path();
            match fs::read(&path).await {
                Ok(bytes) => {
                    index.hashes.insert(md5::compute(&bytes).0);
                }
                Err(e) => {
                    tracing::debug!("skipping unreadable file {:?}: {}", path, e);
                }
            }
        }

        index
    }

    /// Returns true when `content` was already present. Absent content is
    /// recorded before returning, so a repeat within the same run is caught.
    pub fn check_and_insert(&mut self, content: &[u8]) -> bool {
        !self.hashes.insert(md5::compute(content).0)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DedupIndex;
    use tempfile::TempDir;

    #[test]
    fn detects_repeat_content() {
        let mut index = DedupIndex::new();
        assert!(!index.check_and_insert(b"bytes"));
        assert!(index.check_and_insert(b"bytes"));
        assert!(!index.check_and_insert(b"other"));
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn seeds_from_directory_files_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.png"), b"first").unwrap();
        std::fs::write(dir.path().join("b.png"), b"second").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut index = DedupIndex::from_directory(dir.path()).await;
        assert_eq!(index.len(), 2);
        assert!(index.check_and_insert(b"first"));
        assert!(!index.check_and_insert(b"third"));
    }

    #[tokio::test]
    async fn missing_directory_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let index = DedupIndex::from_directory(&dir.path().join("nope")).await;
        assert!(index.is_empty());
    }
}
