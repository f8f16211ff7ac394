use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EjectError {
    #[error("Can't find {} in the project root. Ejector must be run from the root of your project.", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("No dependencies found in package.json.")]
    NoDependencies,

    #[error("No dependency found using filter: \"{filter}\"")]
    DependencyNotFound { filter: String },

    #[error("Didn't find any file types to eject in {dependency}")]
    NoEjectableFilesFound { dependency: String },

    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl EjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EjectError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the user aborted an interactive prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EjectError::Cancelled(_))
    }
}

impl From<glob::PatternError> for EjectError {
    fn from(err: glob::PatternError) -> Self {
        EjectError::Pattern(err.to_string())
    }
}

impl From<dialoguer::Error> for EjectError {
    fn from(err: dialoguer::Error) -> Self {
        EjectError::Prompt(err.to_string())
    }
}
