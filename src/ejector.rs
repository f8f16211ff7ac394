use crate::category::FileCategory;
use crate::config::EjectorConfig;
use crate::copier::{copy_files, CategoryReport};
use crate::dependencies::{eject_directory_name, filter_dependencies, list_dependencies};
use crate::errors::EjectError;
use crate::fs::{EjectFs, RealFs};
use crate::locator::{resolve_destination_root, resolve_source_root};
use crate::prompt::{DialoguerPrompter, InjectedAnswers, Prompter, ScriptedPrompter};
use crate::scanner::{scan_all, DiscoveredFiles};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Outcome of a successful eject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EjectReport {
    pub dependency: String,
    pub categories: Vec<CategoryReport>,
}

pub struct Ejector {
    config: EjectorConfig,
    fs: Arc<dyn EjectFs>,
    prompter: Box<dyn Prompter>,
}

impl Ejector {
    pub fn new(config: EjectorConfig) -> Self {
        Ejector {
            config,
            fs: Arc::new(RealFs),
            prompter: Box::new(DialoguerPrompter),
        }
    }

    /// Redirects destination-side reads and writes.
    pub fn with_fs(mut self, fs: Arc<dyn EjectFs>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn with_answers(self, answers: InjectedAnswers) -> Self {
        self.with_prompter(Box::new(ScriptedPrompter::from(answers)))
    }

    pub fn config(&self) -> &EjectorConfig {
        &self.config
    }

    /// Runs list, filter, select, scan, select types and copy.
    pub async fn eject(&self, filter: Option<&str>) -> Result<EjectReport, EjectError> {
        let dependencies = list_dependencies(&self.config.manifest_path())?;
        let candidates = filter_dependencies(dependencies, filter)?;
        let dependency = self.select_dependency(&candidates).await?;
        debug!("Ejecting {}", dependency);

        let source_root = resolve_source_root(&self.config.install_path(), &dependency);
        let discovered = scan_all(&source_root)?;
        let categories = self.select_categories(&dependency, &discovered).await?;

        let mut reports = Vec::with_capacity(categories.len());
        for category in categories {
            if let Some(files) = discovered.get(category) {
                let report = self
                    .eject_category(&dependency, &source_root, category, files)
                    .await?;
                reports.push(report);
            }
        }

        Ok(EjectReport {
            dependency,
            categories: reports,
        })
    }

    async fn select_dependency(&self, candidates: &[String]) -> Result<String, EjectError> {
        match candidates {
            [only] => Ok(only.clone()),
            _ => self.prompter.select_dependency(candidates).await,
        }
    }

    /// Returns the picked categories in display order, without duplicates.
    async fn select_categories(
        &self,
        dependency: &str,
        discovered: &DiscoveredFiles,
    ) -> Result<Vec<FileCategory>, EjectError> {
        let available = discovered.available();
        let picked = match available.as_slice() {
            [] => {
                return Err(EjectError::NoEjectableFilesFound {
                    dependency: dependency.to_owned(),
                })
            }
            [only] => vec![*only],
            _ => self.prompter.select_categories(dependency, &available).await?,
        };

        Ok(available
            .into_iter()
            .filter(|c| picked.contains(c))
            .collect())
    }

    async fn eject_category(
        &self,
        dependency: &str,
        source_root: &Path,
        category: FileCategory,
        files: &[String],
    ) -> Result<CategoryReport, EjectError> {
        let project_root = &self.config.project_root;
        let eject_dir = eject_directory_name(dependency);
        let destination_root =
            resolve_destination_root(self.fs.as_ref(), project_root, category).await;
        let eject_path = destination_root.join(eject_dir);

        let report = copy_files(
            self.fs.as_ref(),
            source_root,
            &eject_path,
            eject_dir,
            category,
            files,
        )
        .await?;

        println!(
            "{} --> {}",
            dependency.cyan(),
            relative_to(project_root, &eject_path).display().to_string().green()
        );
        Ok(report)
    }
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
