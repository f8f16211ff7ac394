pub mod category;
pub mod config;
pub mod copier;
pub mod dependencies;
pub mod ejector;
pub mod errors;
pub mod fs;
pub mod locator;
pub mod logger;
pub mod prompt;
pub mod scanner;

pub use category::FileCategory;
pub use config::EjectorConfig;
pub use ejector::{EjectReport, Ejector};
pub use errors::EjectError;
pub use prompt::InjectedAnswers;
