//! Recursive desktop scan.
//!
//! Walks each root in order, resolves every `.lnk` file through a
//! [`ShellAutomation`] session and collects the results into a
//! [`ShortcutIndex`]. Nothing in here aborts the scan: unreadable roots,
//! unreadable entries and unresolvable shortcuts are logged, recorded as
//! [`ScanDiagnostic`]s and skipped.

use super::automation::ShellAutomation;
use super::entry::{base_name, ShortcutEntry, UnresolvedShortcut};
use super::index::ShortcutIndex;
use crate::config::DesktopConfig;
use crate::error::DeskscanError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A recoverable problem met during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanDiagnostic {
    #[error("Error walking the path {root:?}: {message}")]
    RootUnreadable { root: PathBuf, message: String },

    #[error("Error accessing path {path:?}: {message}")]
    EntryUnreadable { path: PathBuf, message: String },

    #[error("Error processing {path:?}: {message}")]
    ShortcutUnresolved { path: PathBuf, message: String },
}

impl ScanDiagnostic {
    /// The path the diagnostic refers to.
    pub fn path(&self) -> &Path {
        match self {
            ScanDiagnostic::RootUnreadable { root, .. } => root,
            ScanDiagnostic::EntryUnreadable { path, .. } => path,
            ScanDiagnostic::ShortcutUnresolved { path, .. } => path,
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Successfully resolved shortcuts.
    pub index: ShortcutIndex,
    /// Everything that was skipped, in the order it was met.
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanReport {
    fn record(&mut self, diagnostic: ScanDiagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// Scan `roots` in order and resolve every shortcut found.
///
/// Later roots win when two roots hold a shortcut with the same file name.
pub fn resolve<A, I, P>(automation: &A, roots: I) -> ScanReport
where
    A: ShellAutomation + ?Sized,
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut report = ScanReport::default();

    for root in roots {
        scan_root(automation, root.as_ref(), &mut report);
    }

    info!(
        "Resolved {} shortcuts ({} skipped)",
        report.index.len(),
        report.diagnostics.len()
    );
    report
}

fn scan_root<A>(automation: &A, root: &Path, report: &mut ScanReport)
where
    A: ShellAutomation + ?Sized,
{
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            report.record(ScanDiagnostic::RootUnreadable {
                root: root.to_path_buf(),
                message: DeskscanError::NotADirectory(root.to_path_buf()).to_string(),
            });
            return;
        }
        Err(e) => {
            report.record(ScanDiagnostic::RootUnreadable {
                root: root.to_path_buf(),
                message: DeskscanError::io_with_path(e, root).to_string(),
            });
            return;
        }
    }

    debug!("Scanning {}", root.display());

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                report.record(ScanDiagnostic::EntryUnreadable {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_shortcut_file(entry.path()) {
            continue;
        }

        match resolve_one_shortcut(automation, entry.path()) {
            Ok(shortcut) => {
                debug!("{} -> {}", shortcut.name(), shortcut.target_path());
                if let Some(previous) = report.index.insert(shortcut) {
                    debug!(
                        "{} replaced earlier target {}",
                        entry.file_name().to_string_lossy(),
                        previous
                    );
                }
            }
            Err(e) => {
                report.record(ScanDiagnostic::ShortcutUnresolved {
                    path: entry.path().to_path_buf(),
                    message: e.source.to_string(),
                });
            }
        }
    }
}

/// Resolve a single shortcut file.
///
/// The interpreter object is released before returning, whatever the
/// outcome.
pub fn resolve_one_shortcut<A>(
    automation: &A,
    path: &Path,
) -> std::result::Result<ShortcutEntry, UnresolvedShortcut>
where
    A: ShellAutomation + ?Sized,
{
    let name = base_name(path);
    let fail = |source| UnresolvedShortcut {
        entry: ShortcutEntry::unresolved(path),
        source,
    };

    let link = automation.open_shortcut(path).map_err(fail)?;
    let target = link.target_path().map_err(fail)?;

    Ok(ShortcutEntry::new(name, target))
}

/// Whether `path` carries the shortcut extension, ignoring ASCII case.
pub fn is_shortcut_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DesktopConfig::SHORTCUT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::shortcut::ShortcutLink;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Resolves `<stem>.lnk` to `C:\Targets\<stem>.exe`; stems starting
    /// with "broken" fail. Counts live links to check release.
    #[derive(Default)]
    struct StemShell {
        live_links: Rc<Cell<i32>>,
    }

    struct StemLink {
        stem: String,
        live_links: Rc<Cell<i32>>,
    }

    impl Drop for StemLink {
        fn drop(&mut self) {
            self.live_links.set(self.live_links.get() - 1);
        }
    }

    impl ShortcutLink for StemLink {
        fn target_path(&self) -> Result<String> {
            if self.stem.starts_with("broken-target") {
                return Err(DeskscanError::Other("no TargetPath".into()));
            }
            Ok(format!(r"C:\Targets\{}.exe", self.stem))
        }
    }

    impl ShellAutomation for StemShell {
        fn open_shortcut(&self, path: &Path) -> Result<Box<dyn ShortcutLink + '_>> {
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            if stem.starts_with("broken-open") {
                return Err(DeskscanError::shell("CreateShortcut", 0x8000_4005_u32 as i32));
            }
            self.live_links.set(self.live_links.get() + 1);
            Ok(Box::new(StemLink {
                stem,
                live_links: Rc::clone(&self.live_links),
            }))
        }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"L").unwrap();
    }

    #[test]
    fn test_is_shortcut_file_ignores_case() {
        assert!(is_shortcut_file(Path::new("a.lnk")));
        assert!(is_shortcut_file(Path::new("a.LNK")));
        assert!(is_shortcut_file(Path::new("a.Lnk")));
        assert!(!is_shortcut_file(Path::new("a.lnk.txt")));
        assert!(!is_shortcut_file(Path::new("lnk")));
        assert!(!is_shortcut_file(Path::new("a.url")));
    }

    #[test]
    fn test_resolve_one_success() {
        let shell = StemShell::default();
        let entry = resolve_one_shortcut(&shell, Path::new("desk/Game.lnk")).unwrap();
        assert_eq!(entry.name(), "Game.lnk");
        assert_eq!(entry.target_path(), r"C:\Targets\Game.exe");
        assert_eq!(shell.live_links.get(), 0);
    }

    #[test]
    fn test_resolve_one_open_failure_keeps_name() {
        let shell = StemShell::default();
        let err = resolve_one_shortcut(&shell, Path::new("broken-open.lnk")).unwrap_err();
        assert_eq!(err.entry.name(), "broken-open.lnk");
        assert!(err.entry.target_path().is_empty());
        assert!(matches!(err.source, DeskscanError::ShellAutomation { .. }));
    }

    #[test]
    fn test_resolve_one_property_failure_releases_link() {
        let shell = StemShell::default();
        let err = resolve_one_shortcut(&shell, Path::new("broken-target.lnk")).unwrap_err();
        assert!(err.entry.target_path().is_empty());
        assert_eq!(shell.live_links.get(), 0);
    }

    #[test]
    fn test_scan_walks_nested_directories() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("Tools").join("Deep");
        fs::create_dir_all(&nested).unwrap();
        touch(root.path(), "Top.lnk");
        touch(&nested, "Nested.LNK");
        touch(&nested, "readme.txt");

        let report = resolve(&StemShell::default(), [root.path()]);

        assert_eq!(report.index.len(), 2);
        assert_eq!(report.index.get("Top.lnk"), Some(r"C:\Targets\Top.exe"));
        assert_eq!(report.index.get("Nested.LNK"), Some(r"C:\Targets\Nested.exe"));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_directory_named_like_shortcut_is_skipped() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("Folder.lnk")).unwrap();

        let report = resolve(&StemShell::default(), [root.path()]);

        assert!(report.index.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_root_does_not_stop_next_root() {
        let missing = TempDir::new().unwrap().path().join("gone");
        let present = TempDir::new().unwrap();
        touch(present.path(), "App.lnk");

        let report = resolve(&StemShell::default(), [missing.as_path(), present.path()]);

        assert_eq!(report.index.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(
            &report.diagnostics[0],
            ScanDiagnostic::RootUnreadable { root, message }
                if *root == missing && message.starts_with("IO error at ")
        ));
    }

    #[test]
    fn test_root_that_is_a_file_is_reported() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Lonely.lnk");
        let file_root = dir.path().join("Lonely.lnk");

        let report = resolve(&StemShell::default(), [&file_root]);

        assert!(report.index.is_empty());
        assert_eq!(
            report.diagnostics,
            vec![ScanDiagnostic::RootUnreadable {
                root: file_root.clone(),
                message: format!("Path is not a directory: {}", file_root.display()),
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_recorded_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let locked = root.path().join("Locked");
        let open = root.path().join("Open");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(&open).unwrap();
        touch(&locked, "Hidden.lnk");
        touch(&open, "Visible.lnk");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores directory permissions.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = resolve(&StemShell::default(), [root.path()]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.index.len(), 1);
        assert_eq!(report.index.get("Visible.lnk"), Some(r"C:\Targets\Visible.exe"));
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(
            &report.diagnostics[0],
            ScanDiagnostic::EntryUnreadable { path, .. } if *path == locked
        ));
    }
}
