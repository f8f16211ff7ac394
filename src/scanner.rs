use crate::category::{FileCategory, ALL_CATEGORIES};
use crate::errors::EjectError;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Files found per category for one dependency.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveredFiles {
    files: BTreeMap<FileCategory, Vec<String>>,
}

impl DiscoveredFiles {
    pub fn get(&self, category: FileCategory) -> Option<&[String]> {
        self.files.get(&category).map(Vec::as_slice)
    }

    pub fn insert(&mut self, category: FileCategory, files: Vec<String>) {
        if !files.is_empty() {
            self.files.insert(category, files);
        }
    }

    /// Categories with at least one file, in display order.
    pub fn available(&self) -> Vec<FileCategory> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .filter(|c| self.files.contains_key(c))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Expands `{a,b}` alternatives into separate patterns. Groups do not nest.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let (open, close) = match (pattern.find('{'), pattern.find('}')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return vec![pattern.to_owned()],
    };

    let prefix = &pattern[..open];
    let suffix = expand_braces(&pattern[close + 1..]);
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| suffix.iter().map(move |rest| format!("{}{}{}", prefix, alt, rest)))
        .collect()
}

fn compile(patterns: &[&str]) -> Result<Vec<Pattern>, EjectError> {
    patterns
        .iter()
        .flat_map(|p| expand_braces(p))
        .map(|p| Pattern::new(&p).map_err(EjectError::from))
        .collect()
}

fn has_extension(file: &str, extensions: &[&str]) -> bool {
    Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Lists every regular, non-hidden file under `root` as a `/`-separated
/// path relative to `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            let relative: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(relative.join("/"));
        }
    }
    files.sort();
    files
}

/// Applies the category's patterns in priority order to a file listing and
/// returns the matches of the first pattern that yields any.
pub fn match_category(
    files: &[String],
    category: FileCategory,
) -> Result<Option<Vec<String>>, EjectError> {
    let excludes = compile(category.excludes())?;
    let candidates: Vec<&String> = files
        .iter()
        .filter(|f| has_extension(f, category.extensions()))
        .collect();

    for pattern in category.patterns() {
        let includes = compile(&[*pattern])?;
        let matched: Vec<String> = candidates
            .iter()
            .copied()
            .filter(|f| includes.iter().any(|p| p.matches_with(f, MATCH_OPTIONS)))
            .filter(|f| !excludes.iter().any(|p| p.matches_with(f, MATCH_OPTIONS)))
            .cloned()
            .collect();

        if !matched.is_empty() {
            debug!(
                "{}: pattern {} matched {} files",
                category,
                pattern,
                matched.len()
            );
            return Ok(Some(matched));
        }
        trace!("{}: pattern {} matched nothing", category, pattern);
    }
    Ok(None)
}

pub fn scan(source_root: &Path, category: FileCategory) -> Result<Option<Vec<String>>, EjectError> {
    match_category(&list_files(source_root), category)
}

/// Scans every category against one listing of `source_root`.
pub fn scan_all(source_root: &Path) -> Result<DiscoveredFiles, EjectError> {
    let files = list_files(source_root);
    debug!("Scanning {} files under {}", files.len(), source_root.display());

    let mut discovered = DiscoveredFiles::default();
    for category in ALL_CATEGORIES {
        if let Some(matched) = match_category(&files, category)? {
            discovered.insert(category, matched);
        }
    }
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(expand_braces("**/*.css"), vec!["**/*.css"]);
        assert_eq!(
            expand_braces("{scss,sass}/**/*.{scss,sass}"),
            vec![
                "scss/**/*.scss",
                "scss/**/*.sass",
                "sass/**/*.scss",
                "sass/**/*.sass"
            ]
        );
    }

    #[test]
    fn test_dir_scoped_pattern_wins() {
        let files = listing(&["css/main.css", "css/theme/dark.css", "other.css"]);
        let matched = match_category(&files, FileCategory::Stylesheet).unwrap();
        assert_eq!(matched, Some(listing(&["css/main.css", "css/theme/dark.css"])));
    }

    #[test]
    fn test_fallback_excludes_dist_docs_and_manifest() {
        let files = listing(&[
            "dist/bundle.js",
            "docs/example.js",
            "index.js",
            "package.json",
            "utils/data.json",
        ]);
        let matched = match_category(&files, FileCategory::Script).unwrap();
        assert_eq!(matched, Some(listing(&["index.js", "utils/data.json"])));
    }

    #[test]
    fn test_font_directory_pattern() {
        let files = listing(&["webfonts/fa.woff2", "img/logo.svg"]);
        let matched = match_category(&files, FileCategory::Webfont).unwrap();
        assert_eq!(matched, Some(listing(&["webfonts/fa.woff2"])));
    }

    #[test]
    fn test_extension_must_belong_to_category() {
        let files = listing(&["js/readme.md", "js/index.mjs", "js/data.json5"]);
        let matched = match_category(&files, FileCategory::Script).unwrap();
        assert_eq!(matched, Some(listing(&["js/index.mjs"])));
        assert!(has_extension("a/b.woff2", FileCategory::Webfont.extensions()));
        assert!(!has_extension("a/b", FileCategory::Webfont.extensions()));
    }

    #[test]
    fn test_no_match_is_none() {
        let files = listing(&["README.md"]);
        assert_eq!(match_category(&files, FileCategory::Less).unwrap(), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let files = listing(&["STYLE.CSS"]);
        assert_eq!(match_category(&files, FileCategory::Stylesheet).unwrap(), None);
    }

    #[test]
    fn test_discovered_files_available_order() {
        let mut discovered = DiscoveredFiles::default();
        discovered.insert(FileCategory::Webfont, listing(&["a.ttf"]));
        discovered.insert(FileCategory::Script, listing(&["a.js"]));
        discovered.insert(FileCategory::Less, Vec::new());
        assert_eq!(
            discovered.available(),
            vec![FileCategory::Script, FileCategory::Webfont]
        );
    }
}
