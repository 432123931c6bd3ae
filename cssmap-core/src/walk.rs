//! Recursive file enumeration with an extension filter

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use tracing::{
    debug,
    warn,
};
use walkdir::{
    DirEntry,
    WalkDir,
};

use crate::error::{
    AuditError,
    AuditResult,
};

/// Check whether a file name ends in `.<extension>`, ignoring case
///
/// The test is made on the full file name, so a bare `.css` dotfile counts
/// while `style.scss` does not.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let suffix = format!(".{}", extension.trim_start_matches('.')).to_lowercase();
    name.to_string_lossy().to_lowercase().ends_with(&suffix)
}

/// Whether the entry should be treated as a file
///
/// Symlinks are not followed while walking. A link to a directory is left
/// alone, any other link (dangling ones included) is listed like a file.
fn is_listed_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    entry.path_is_symlink() && !entry.path().is_dir()
}

/// Walks a source root and yields the files carrying a given extension
#[derive(Debug, Clone)]
pub struct FileWalker {
    root:      PathBuf,
    extension: String,
}

impl FileWalker {
    /// Create a walker after checking that `root` is a readable directory
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> AuditResult<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|source| AuditError::SourceRoot {
            path: root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(AuditError::NotADirectory(root));
        }
        fs::read_dir(&root).map_err(|source| AuditError::SourceRoot {
            path: root.clone(),
            source,
        })?;

        Ok(Self {
            root,
            extension: extension.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Lazily yield matching files, siblings in file-name order
    ///
    /// Entries that cannot be read below the root are logged and skipped.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    None
                },
            })
            .filter(is_listed_file)
            .filter(move |entry| {
                let matched = has_extension(entry.path(), &self.extension);
                if !matched {
                    debug!(path = %entry.path().display(), "Skipping non-matching file");
                }
                matched
            })
            .map(DirEntry::into_path)
    }
}
