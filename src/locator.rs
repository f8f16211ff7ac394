use crate::category::FileCategory;
use crate::fs::EjectFs;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const SOURCE_DIRS: [&str; 2] = ["src", "lib"];

/// Installed code directory of a dependency: `src/`, then `lib/`, then the
/// package root itself. Always checked against the real filesystem.
pub fn resolve_source_root(install_path: &Path, dependency: &str) -> PathBuf {
    let package_root = install_path.join(dependency);
    for dir in SOURCE_DIRS {
        let candidate = package_root.join(dir);
        if candidate.exists() {
            debug!("Source root for {}: {}", dependency, candidate.display());
            return candidate;
        }
    }
    debug!("Source root for {}: {}", dependency, package_root.display());
    package_root
}

/// First existing of `src/<dir>`, `lib/<dir>`, `src`, `lib` under the
/// project, else the project root.
pub async fn resolve_destination_root(
    fs: &dyn EjectFs,
    project_root: &Path,
    category: FileCategory,
) -> PathBuf {
    let dir = category.dir_name();
    let candidates = [
        project_root.join("src").join(dir),
        project_root.join("lib").join(dir),
        project_root.join("src"),
        project_root.join("lib"),
    ];

    for candidate in candidates {
        if fs.exists(&candidate).await {
            debug!("Destination root for {}: {}", category, candidate.display());
            return candidate;
        }
    }
    debug!(
        "Destination root for {}: {} (project root)",
        category,
        project_root.display()
    );
    project_root.to_path_buf()
}

/// Collapses the first `<dir>/<eject>/<dir>` run of components into
/// `<dir>/<eject>`, so `src/js/foo/js/a.js` becomes `src/js/foo/a.js`.
pub fn correct_write_path(path: &Path, category: FileCategory, eject_dir: &str) -> PathBuf {
    let dir = OsStr::new(category.dir_name());
    let eject_dir = OsStr::new(eject_dir);
    let components: Vec<Component> = path.components().collect();

    let duplicate = components.windows(3).position(|w| {
        w[0].as_os_str() == dir && w[1].as_os_str() == eject_dir && w[2].as_os_str() == dir
    });

    match duplicate {
        Some(start) => components
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != start + 2)
            .map(|(_, c)| c.as_os_str())
            .collect(),
        None => path.to_path_buf(),
    }
}

/// Destination of one source file. `relative` uses `/` separators.
pub fn write_path(
    eject_path: &Path,
    relative: &str,
    category: FileCategory,
    eject_dir: &str,
) -> PathBuf {
    let joined = relative
        .split('/')
        .fold(eject_path.to_path_buf(), |acc, part| acc.join(part));
    correct_write_path(&joined, category, eject_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn test_collapses_duplicated_category_segment() {
        let path = Path::new("/p/src/js/chart/js/lib/a.js");
        assert_eq!(
            correct_write_path(path, FileCategory::Script, "chart"),
            PathBuf::from("/p/src/js/chart/lib/a.js")
        );
    }

    #[test]
    fn test_leaves_similar_names_alone() {
        let path = Path::new("/p/src/js/chart/json/a.json");
        assert_eq!(
            correct_write_path(path, FileCategory::Script, "chart"),
            path.to_path_buf()
        );
    }

    #[test]
    fn test_write_path_mirrors_relative_path() {
        let eject = Path::new("/p/src/fontawesome-free");
        assert_eq!(
            write_path(eject, "webfonts/fa-brands-400.eot", FileCategory::Webfont, "fontawesome-free"),
            PathBuf::from("/p/src/fontawesome-free/webfonts/fa-brands-400.eot")
        );
    }

    #[tokio::test]
    async fn test_destination_priority() {
        let root = Path::new("/p");
        let fs = MemoryFs::new().with_dir("/p/lib/css").with_dir("/p/src");
        assert_eq!(
            resolve_destination_root(&fs, root, FileCategory::Stylesheet).await,
            PathBuf::from("/p/lib/css")
        );
        assert_eq!(
            resolve_destination_root(&fs, root, FileCategory::Script).await,
            PathBuf::from("/p/src")
        );
    }

    #[tokio::test]
    async fn test_destination_falls_back_to_project_root() {
        let fs = MemoryFs::new();
        assert_eq!(
            resolve_destination_root(&fs, Path::new("/p"), FileCategory::Less).await,
            PathBuf::from("/p")
        );
    }

    #[test]
    fn test_source_root_priority() {
        let dir = tempfile::tempdir().unwrap();
        let install = dir.path();
        std::fs::create_dir_all(install.join("a/lib")).unwrap();
        std::fs::create_dir_all(install.join("b/src")).unwrap();
        std::fs::create_dir_all(install.join("b/lib")).unwrap();
        std::fs::create_dir_all(install.join("c")).unwrap();

        assert_eq!(resolve_source_root(install, "a"), install.join("a/lib"));
        assert_eq!(resolve_source_root(install, "b"), install.join("b/src"));
        assert_eq!(resolve_source_root(install, "c"), install.join("c"));
    }
}
