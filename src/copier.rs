use crate::category::FileCategory;
use crate::errors::EjectError;
use crate::fs::EjectFs;
use crate::locator::write_path;
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// Where one category's files were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: FileCategory,
    pub destination: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Copies `relative_paths` from `source_root` (real filesystem) into
/// `eject_path` on `fs`, verbatim. Stops at the first failure; files already
/// written stay in place.
pub async fn copy_files(
    fs: &dyn EjectFs,
    source_root: &Path,
    eject_path: &Path,
    eject_dir: &str,
    category: FileCategory,
    relative_paths: &[String],
) -> Result<CategoryReport, EjectError> {
    let mut written = Vec::with_capacity(relative_paths.len());

    for relative in relative_paths {
        let read_path = source_root.join(relative);
        let contents = tokio::fs::read(&read_path)
            .await
            .map_err(|e| EjectError::io(&read_path, e))?;

        let target = write_path(eject_path, relative, category, eject_dir);
        if let Some(parent) = target.parent() {
            if !fs.exists(parent).await {
                fs.create_dir_all(parent)
                    .await
                    .map_err(|e| EjectError::io(parent, e))?;
            }
        }
        fs.write(&target, &contents)
            .await
            .map_err(|e| EjectError::io(&target, e))?;

        trace!("Copied {} -> {}", read_path.display(), target.display());
        written.push(target);
    }

    info!("Ejected {} {} files", written.len(), category);
    Ok(CategoryReport {
        category,
        destination: eject_path.to_path_buf(),
        files: written,
    })
}
