//! @acp:module "Source Scanner"
//! @acp:summary "Discovers candidate source files under the package roots"
//! @acp:domain cli
//! @acp:layer io

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;

/// All files under `root` whose extension is `extension`.
///
/// A missing root yields an empty list. Entries that cannot be read are
/// skipped. Symlinks to files are included.
pub fn sources_in<P: AsRef<Path>>(root: P, extension: &str) -> Vec<PathBuf> {
    let root = root.as_ref();
    if !root.is_dir() {
        tracing::debug!("Skipping missing source root {}", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        // Links to files count as files; linked directories are not descended
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .map(|e| e.into_path())
        .collect()
}

/// @acp:summary "Sources of every configured root, concatenated in root order"
pub fn discover_sources(config: &Config) -> Vec<PathBuf> {
    config
        .source_roots()
        .iter()
        .flat_map(|root| sources_in(root, &config.extension))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_filters_by_extension_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Sources/System/FileDescriptor.swift");
        touch(tmp.path(), "Sources/System/Internal/Syscalls.swift");
        touch(tmp.path(), "Sources/CSystem/shims.c");
        touch(tmp.path(), "Sources/System/README.md");
        touch(tmp.path(), "Sources/System/notes.swift.orig");

        let found = sources_in(tmp.path().join("Sources"), "swift");
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"FileDescriptor.swift".to_string()));
        assert!(names.contains(&"Syscalls.swift".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_sources_included() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Shared/Common.swift");
        touch(tmp.path(), "Sources/System/Own.swift");
        std::os::unix::fs::symlink(
            tmp.path().join("Shared/Common.swift"),
            tmp.path().join("Sources/System/Common.swift"),
        )
        .unwrap();

        let found = sources_in(tmp.path().join("Sources"), "swift");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&tmp.path().join("Sources/System/Common.swift")));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(sources_in(tmp.path().join("Nope"), "swift").is_empty());
    }

    #[test]
    fn test_discover_concatenates_roots() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Tests/SystemTests/ErrnoTest.swift");
        touch(tmp.path(), "Sources/System/Errno.swift");
        touch(tmp.path(), "Utilities/generate.swift");

        let found = discover_sources(&Config::for_root(tmp.path()));
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with(tmp.path().join("Sources")));
        assert!(found[1].starts_with(tmp.path().join("Tests")));
    }
}
