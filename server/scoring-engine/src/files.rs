//! Selected upload files: plain-text filter, `(name, size)` dedup, batch reading.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
  pub name: String,
  pub size: u64,
  pub content: String,
}

impl SelectedFile {
  /// Build a file from in-memory text; `size` is the UTF-8 byte length.
  pub fn from_text(name: impl Into<String>, content: impl Into<String>) -> Self {
    let content = content.into();
    Self {
      name: name.into(),
      size: content.len() as u64,
      content,
    }
  }
}

/// Only `.txt` uploads are accepted.
pub fn is_plain_text(name: &str) -> bool {
  Path::new(name)
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Ordered set of selected files.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
  files: Vec<SelectedFile>,
}

impl FileSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add new files, skipping non-text files and `(name, size)` repeats.
  /// Returns how many were actually added.
  pub fn add(&mut self, incoming: impl IntoIterator<Item = SelectedFile>) -> usize {
    let mut added = 0;
    for file in incoming {
      if !is_plain_text(&file.name) {
        debug!(file = %file.name, "skipping non-text file");
        continue;
      }
      if self.contains(&file.name, file.size) {
        debug!(file = %file.name, size = file.size, "file already selected");
        continue;
      }
      self.files.push(file);
      added += 1;
    }
    added
  }

  /// Remove every file with this name. Returns whether anything was removed.
  pub fn remove(&mut self, name: &str) -> bool {
    let before = self.files.len();
    self.files.retain(|f| f.name != name);
    self.files.len() != before
  }

  pub fn clear(&mut self) {
    self.files.clear();
  }

  pub fn contains(&self, name: &str, size: u64) -> bool {
    self.files.iter().any(|f| f.name == name && f.size == size)
  }

  pub fn names(&self) -> Vec<&str> {
    self.files.iter().map(|f| f.name.as_str()).collect()
  }

  pub fn contents(&self) -> Vec<&str> {
    self.files.iter().map(|f| f.content.as_str()).collect()
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

/// Read every path concurrently. Any read failure rejects the whole batch.
///
/// Invalid UTF-8 is replaced, not rejected; `size` is the on-disk byte length.
pub async fn read_batch(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, EngineError> {
  let reads = paths.iter().map(|path| async move {
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());
    let bytes = tokio::fs::read(path)
      .await
      .map_err(|e| EngineError::read(path.display().to_string(), e))?;
    let content = String::from_utf8_lossy(&bytes);
    if let std::borrow::Cow::Owned(_) = content {
      warn!(file = %name, "replaced invalid UTF-8 while reading");
    }
    Ok::<_, EngineError>(SelectedFile {
      name,
      size: bytes.len() as u64,
      content: content.into_owned(),
    })
  });

  try_join_all(reads).await.inspect_err(|e| {
    error!(error = %e, files = paths.len(), "file batch rejected");
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_txt_files_are_accepted() {
    assert!(is_plain_text("commits_main.txt"));
    assert!(is_plain_text("COMMITS.TXT"));
    assert!(!is_plain_text("commits.csv"));
    assert!(!is_plain_text("txt"));
  }

  #[test]
  fn same_name_and_size_is_a_noop() {
    let mut set = FileSet::new();
    assert_eq!(set.add([SelectedFile::from_text("a.txt", "abc")]), 1);
    assert_eq!(set.add([SelectedFile::from_text("a.txt", "xyz")]), 0);
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn same_name_different_size_is_distinct() {
    let mut set = FileSet::new();
    set.add([SelectedFile::from_text("a.txt", "abc")]);
    set.add([SelectedFile::from_text("a.txt", "abcd")]);
    assert_eq!(set.names(), vec!["a.txt", "a.txt"]);

    assert!(set.remove("a.txt"));
    assert!(set.is_empty());
    assert!(!set.remove("a.txt"));
  }

  #[tokio::test]
  async fn batch_read_succeeds_for_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, "A repo/a.ts#c;x\n").unwrap();
    std::fs::write(&b, "M repo/b.ts#c;x\n").unwrap();

    let files = read_batch(&[a, b]).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(files[1].content, "M repo/b.ts#c;x\n");
  }

  #[tokio::test]
  async fn invalid_utf8_is_replaced_not_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, "A repo/a.ts#c;x\n").unwrap();
    let mut latin1 = b"repo : c2 : main : Corre\xe7\xe3o : 2024-01-02\n".to_vec();
    latin1.extend_from_slice(b"M repo/b.ts#c2;x\n");
    std::fs::write(&b, &latin1).unwrap();

    let files = read_batch(&[a, b]).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1].size, latin1.len() as u64);
    assert!(files[1].content.contains("Corre\u{fffd}\u{fffd}o"));

    let categories = crate::categorize(&files.iter().map(|f| f.content.as_str()).collect::<Vec<_>>());
    assert_eq!(categories.iter().map(|c| c.lines.len()).sum::<usize>(), 2);
  }

  #[tokio::test]
  async fn one_missing_file_rejects_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    std::fs::write(&a, "A repo/a.ts#c;x\n").unwrap();
    let missing = dir.path().join("missing.txt");

    let err = read_batch(&[a, missing]).await.unwrap_err();
    assert!(matches!(err, EngineError::Read { .. }));
    assert!(err.to_string().contains("missing.txt"));
  }
}
