//! Source-to-target path mapping and existence checks

use std::path::{
    Path,
    PathBuf,
};

use tracing::{
    debug,
    info,
};

use crate::{
    config::AuditConfig,
    error::AuditResult,
    rename::RenameRules,
    walk::FileWalker,
};

/// A source file whose renamed counterpart is absent from the target root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEntry {
    /// Path relative to the source root
    pub source:    PathBuf,
    /// Renamed path, relative to the target root
    pub candidate: PathBuf,
}

/// Outcome of a full audit pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    /// Number of files that matched the extension filter
    pub scanned:     usize,
    /// Missing candidates in traversal order
    pub missing:     Vec<MissingEntry>,
}

impl AuditReport {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Turns source-relative paths into candidate paths under the target root
#[derive(Debug, Clone)]
pub struct PathMapper {
    target_root: PathBuf,
    rules:       RenameRules,
}

impl PathMapper {
    pub fn new(target_root: impl Into<PathBuf>, rules: RenameRules) -> Self {
        Self {
            target_root: target_root.into(),
            rules,
        }
    }

    /// Apply the rename rules to a source-relative path
    ///
    /// Names that are not UTF-8 are rewritten byte-wise on unix. Elsewhere
    /// they are returned unchanged.
    pub fn rename(&self, relative: &Path) -> PathBuf {
        match relative.to_str() {
            Some(text) => PathBuf::from(self.rules.apply(text)),
            None => self.rename_raw(relative),
        }
    }

    #[cfg(unix)]
    fn rename_raw(&self, relative: &Path) -> PathBuf {
        use std::{
            ffi::OsString,
            os::unix::ffi::{
                OsStrExt,
                OsStringExt,
            },
        };

        debug!(path = %relative.display(), "Renaming non-UTF-8 path byte-wise");
        let renamed = self.rules.apply_bytes(relative.as_os_str().as_bytes());
        PathBuf::from(OsString::from_vec(renamed))
    }

    #[cfg(not(unix))]
    fn rename_raw(&self, relative: &Path) -> PathBuf {
        tracing::warn!(
            path = %relative.display(),
            "Path is not valid UTF-8, checking it without renaming"
        );
        relative.to_path_buf()
    }

    /// Full candidate path for a source-relative path
    pub fn candidate(&self, relative: &Path) -> PathBuf {
        self.target_root.join(self.rename(relative))
    }

    /// Return a [`MissingEntry`] when the candidate does not exist
    pub fn check(&self, relative: &Path) -> Option<MissingEntry> {
        let candidate = self.candidate(relative);
        if candidate.exists() {
            debug!(
                source = %relative.display(),
                candidate = %candidate.display(),
                "Candidate present"
            );
            return None;
        }

        let candidate = pathdiff::diff_paths(&candidate, &self.target_root).unwrap_or(candidate);
        debug!(
            source = %relative.display(),
            candidate = %candidate.display(),
            "Candidate missing"
        );
        Some(MissingEntry {
            source: relative.to_path_buf(),
            candidate,
        })
    }
}

/// Walk the source root and collect every file whose candidate is missing
///
/// Fails only when the source root itself is unusable.
pub fn run_audit(config: &AuditConfig) -> AuditResult<AuditReport> {
    info!(
        source = %config.source_root.display(),
        target = %config.target_root.display(),
        extension = %config.extension,
        "Starting path audit"
    );

    let walker = FileWalker::new(&config.source_root, &config.extension)?;
    debug!(extension = %walker.extension(), "Walking source root");
    let mapper = PathMapper::new(&config.target_root, config.rules.clone());

    let mut scanned = 0;
    let mut missing = Vec::new();
    for file in walker.files() {
        scanned += 1;
        let relative = relative_to(&file, walker.root());
        if let Some(entry) = mapper.check(&relative) {
            missing.push(entry);
        }
    }

    info!(scanned, missing = missing.len(), "Path audit finished");
    Ok(AuditReport {
        source_root: config.source_root.clone(),
        target_root: config.target_root.clone(),
        scanned,
        missing,
    })
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::AuditError;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn config_for(temp_dir: &TempDir) -> AuditConfig {
        let source = temp_dir.path().join("Argu");
        let target = temp_dir.path().join("Debate");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&target).unwrap();
        AuditConfig::default()
            .with_source_root(Some(source))
            .with_target_root(Some(target))
    }

    #[test]
    fn test_mapper_candidate() {
        let mapper = PathMapper::new("/target", RenameRules::default());
        assert_eq!(
            mapper.candidate(Path::new("ArguAdmin/argu.css")),
            PathBuf::from("/target/DebateAdmin/debate.css")
        );
    }

    #[test]
    fn test_reference_scenario() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        touch(&config.source_root, "a/Argu.css");
        touch(&config.source_root, "b/ArguUser/x.css");
        touch(&config.target_root, "a/Debate.css");

        let report = run_audit(&config)?;

        assert_eq!(report.scanned, 2);
        assert_eq!(
            report.missing,
            vec![MissingEntry {
                source:    PathBuf::from("b/ArguUser/x.css"),
                candidate: PathBuf::from("b/DebateUser/x.css"),
            }]
        );
        Ok(())
    }

    #[test]
    fn test_present_candidates_not_reported() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        touch(&config.source_root, "ArguAdmin/css/argu-theme.CSS");
        touch(&config.source_root, "common/reset.css");
        touch(&config.target_root, "DebateAdmin/css/debate-theme.CSS");
        touch(&config.target_root, "common/reset.css");

        let report = run_audit(&config)?;
        assert_eq!(report.scanned, 2);
        assert!(report.is_complete());
        Ok(())
    }

    #[test]
    fn test_each_missing_file_reported_once() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        touch(&config.source_root, "x/one.css");
        touch(&config.source_root, "x/two.css");
        touch(&config.source_root, "x/three.scss");
        touch(&config.source_root, "x/notes.txt");

        let report = run_audit(&config)?;
        assert_eq!(report.scanned, 2);
        assert_eq!(report.missing_count(), 2);
        let sources: Vec<&Path> = report.missing.iter().map(|m| m.source.as_path()).collect();
        assert_eq!(sources, vec![Path::new("x/one.css"), Path::new("x/two.css")]);
        Ok(())
    }

    #[test]
    fn test_directory_candidate_counts_as_present() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        touch(&config.source_root, "Argu.css");
        fs::create_dir_all(config.target_root.join("Debate.css"))?;

        let report = run_audit(&config)?;
        assert!(report.is_complete());
        Ok(())
    }

    #[test]
    fn test_empty_source_root() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        let report = run_audit(&config)?;
        assert_eq!(report.scanned, 0);
        assert_eq!(report.missing_count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_target_root_reports_everything() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir).with_target_root(Some(temp_dir.path().join("none")));
        touch(&config.source_root, "argu.css");

        let report = run_audit(&config)?;
        assert_eq!(report.missing[0].candidate, PathBuf::from("debate.css"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_renamed() {
        use std::{
            ffi::OsStr,
            os::unix::ffi::OsStrExt,
        };

        let mapper = PathMapper::new("/target", RenameRules::default());
        let relative = Path::new(OsStr::from_bytes(b"ArguUser/argu\xff.css"));
        assert_eq!(
            mapper.candidate(relative),
            Path::new("/target").join(OsStr::from_bytes(b"DebateUser/debate\xff.css"))
        );
    }

    // Filesystems on other unixes may refuse names that are not UTF-8
    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_with_present_candidate() -> Result<(), Box<dyn std::error::Error>> {
        use std::{
            ffi::OsStr,
            os::unix::ffi::OsStrExt,
        };

        let temp_dir = TempDir::new()?;
        let config = config_for(&temp_dir);
        fs::create_dir_all(config.source_root.join("ArguUser"))?;
        fs::create_dir_all(config.target_root.join("DebateUser"))?;
        fs::write(
            config.source_root.join("ArguUser").join(OsStr::from_bytes(b"argu\xff.css")),
            "",
        )?;
        fs::write(
            config.target_root.join("DebateUser").join(OsStr::from_bytes(b"debate\xff.css")),
            "",
        )?;

        let report = run_audit(&config)?;
        assert_eq!(report.scanned, 1);
        assert!(report.is_complete(), "unexpected report: {:?}", report.missing);
        Ok(())
    }

    #[test]
    fn test_missing_source_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = AuditConfig::default()
            .with_source_root(Some(temp_dir.path().join("absent")))
            .with_target_root(Some(temp_dir.path().to_path_buf()));
        assert!(matches!(run_audit(&config), Err(AuditError::SourceRoot { .. })));
    }
}
