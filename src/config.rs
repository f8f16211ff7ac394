use std::path::PathBuf;

pub const DEFAULT_INSTALL_DIR: &str = "node_modules";
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// Where the ejector looks for the manifest and installed dependencies.
#[derive(Debug, Clone)]
pub struct EjectorConfig {
    pub project_root: PathBuf,
    pub install_dir: String,
    pub manifest_file: String,
}

impl EjectorConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        EjectorConfig {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.manifest_file)
    }

    pub fn install_path(&self) -> PathBuf {
        self.project_root.join(&self.install_dir)
    }
}

impl Default for EjectorConfig {
    fn default() -> Self {
        EjectorConfig {
            project_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            install_dir: DEFAULT_INSTALL_DIR.to_owned(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_owned(),
        }
    }
}
