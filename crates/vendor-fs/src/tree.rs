//! Whole-directory operations used when rebuilding vendored trees

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Remove a directory tree if it exists.
///
/// Filesystem roots and empty paths are rejected.
pub fn remove_tree(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.parent().is_none() {
        return Err(Error::UnsafeRemoval {
            path: path.to_path_buf(),
            reason: "path has no parent directory".to_string(),
        });
    }
    if path.file_name().is_none() {
        return Err(Error::UnsafeRemoval {
            path: path.to_path_buf(),
            reason: "path ends in '..'".to_string(),
        });
    }

    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed directory tree");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Delete `path` (if present) and create it again empty.
pub fn recreate_dir(path: &Path) -> Result<()> {
    remove_tree(path)?;
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Remove a single file. Returns whether a file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// List regular files directly inside `dir` whose extension is one of
/// `extensions`, sorted by file name.
///
/// Subdirectories are not descended into. A missing directory yields an
/// empty list.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if !file_type.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Copy each file into `dest_dir`, keeping only its file name.
///
/// Returns the destination paths in input order. Later files overwrite
/// earlier ones with the same name.
pub fn copy_into(files: &[PathBuf], dest_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir, e))?;

    let mut copied = Vec::with_capacity(files.len());
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let dest = dest_dir.join(name);
        fs::copy(file, &dest).map_err(|e| Error::io(file, e))?;
        copied.push(dest);
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn recreate_dir_drops_stale_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("golang");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.c"), "old").unwrap();

        recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn remove_tree_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        remove_tree(&temp.path().join("absent")).unwrap();
    }

    #[test]
    fn remove_tree_rejects_root() {
        let err = remove_tree(Path::new("/")).unwrap_err();
        assert!(matches!(err, Error::UnsafeRemoval { .. }));
    }

    #[test]
    fn remove_tree_rejects_parent_reference() {
        let temp = TempDir::new().unwrap();
        let inner = temp.path().join("vendor");
        fs::create_dir_all(&inner).unwrap();
        fs::write(temp.path().join("precious.txt"), "keep").unwrap();

        let err = remove_tree(&inner.join("..")).unwrap_err();

        assert!(matches!(err, Error::UnsafeRemoval { .. }));
        assert!(temp.path().join("precious.txt").exists());
    }

    #[test]
    fn list_files_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tree.c"), "").unwrap();
        fs::write(temp.path().join("alloc.c"), "").unwrap();
        fs::write(temp.path().join("alloc.h"), "").unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();
        fs::create_dir(temp.path().join("unicode.c")).unwrap();

        let files = list_files(temp.path(), &["c"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["alloc.c", "tree.c"]);
    }

    #[test]
    fn list_files_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_files(&temp.path().join("nope"), &["h"]).unwrap().is_empty());
    }

    #[test]
    fn copy_into_flattens() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("lib").join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("node.c"), "node").unwrap();
        let dest = temp.path().join("out");

        let copied = copy_into(&[src.join("node.c")], &dest).unwrap();

        assert_eq!(copied, vec![dest.join("node.c")]);
        assert_eq!(fs::read_to_string(dest.join("node.c")).unwrap(), "node");
    }

    #[test]
    fn remove_file_if_exists_reports() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lib.c");
        fs::write(&path, "").unwrap();

        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!remove_file_if_exists(&path).unwrap());
    }
}
