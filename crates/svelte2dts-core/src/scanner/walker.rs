//! Lazy recursive traversal of a single source root

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Depth-first iterator over the regular files below one root
///
/// The root is checked for existence once, when the walker is created.
/// Entries are visited in file-name order within each directory.
/// Symbolic links are neither followed nor yielded unless
/// `follow_symlinks` is set, in which case link cycles surface as
/// [`Error::Walk`].
pub struct SourceWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl SourceWalker {
    /// Start a traversal of `root`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if `root` does not exist and
    /// [`Error::NotADirectory`] if it is not a directory.
    pub fn new(root: &Path, follow_symlinks: bool) -> Result<Self> {
        check_root(root)?;

        tracing::debug!(root = %root.display(), follow_symlinks, "walking source root");

        let inner = WalkDir::new(root)
            .follow_links(follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        Ok(Self {
            root: root.to_path_buf(),
            inner,
        })
    }

    /// Root this walker traverses
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A source root must exist and be a directory
pub(crate) fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(Error::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

impl Iterator for SourceWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(Error::Walk {
                        root: self.root.clone(),
                        source,
                    }));
                }
            };

            // With follow_links(false) a symlink reports its own type and is
            // skipped here; with follow_links(true) it reports the target's.
            if entry.file_type().is_file() {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs as unix_fs;

    fn collect(walker: SourceWalker) -> Vec<PathBuf> {
        walker.map(|p| p.unwrap()).collect()
    }

    #[test]
    fn test_walks_recursively_in_name_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b").join("deep")).unwrap();
        fs::write(root.join("c.svelte"), "").unwrap();
        fs::write(root.join("a.svelte"), "").unwrap();
        fs::write(root.join("b").join("x.ts"), "").unwrap();
        fs::write(root.join("b").join("deep").join("y.svelte"), "").unwrap();

        let files = collect(SourceWalker::new(root, false).unwrap());

        assert_eq!(
            files,
            vec![
                root.join("a.svelte"),
                root.join("b").join("deep").join("y.svelte"),
                root.join("b").join("x.ts"),
                root.join("c.svelte"),
            ]
        );
    }

    #[test]
    fn test_missing_root_fails_immediately() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing-dir");

        let err = SourceWalker::new(&missing, false).err().unwrap();

        assert!(matches!(err, Error::DirectoryNotFound { path } if path == missing));
    }

    #[test]
    fn test_file_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("Button.svelte");
        fs::write(&file, "").unwrap();

        let err = SourceWalker::new(&file, false).err().unwrap();

        assert!(matches!(err, Error::NotADirectory { path } if path == file));
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(collect(SourceWalker::new(tmp.path(), false).unwrap()).is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinks_skipped_by_default() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("Real.svelte"), "").unwrap();

        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("Linked.svelte"), "").unwrap();

        unix_fs::symlink(&outside, root.join("linked-dir")).unwrap();
        unix_fs::symlink(root.join("Real.svelte"), root.join("Alias.svelte")).unwrap();

        let files = collect(SourceWalker::new(&root, false).unwrap());

        assert_eq!(files, vec![root.join("Real.svelte")]);
    }

    #[test]
    #[cfg(unix)]
    fn test_follow_symlinks_yields_linked_files() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("src");
        fs::create_dir(&root).unwrap();

        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("Linked.svelte"), "").unwrap();
        unix_fs::symlink(&outside, root.join("linked-dir")).unwrap();

        let files = collect(SourceWalker::new(&root, true).unwrap());

        assert_eq!(files, vec![root.join("linked-dir").join("Linked.svelte")]);
    }

    #[test]
    #[cfg(unix)]
    fn test_follow_symlinks_detects_cycles() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("src");
        fs::create_dir_all(root.join("inner")).unwrap();
        unix_fs::symlink(&root, root.join("inner").join("back")).unwrap();

        let results: Vec<_> = SourceWalker::new(&root, true).unwrap().collect();

        assert!(results.iter().any(|r| matches!(r, Err(Error::Walk { .. }))));
    }
}
