use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// None of these abort keyword processing: pattern failures skip a single
/// keyword and store failures are logged by the matcher.

#[derive(Error, Debug)]
pub enum KeywordError {
    #[error("Keyword is empty after trimming")]
    Empty,

    #[error("Failed to build match pattern for keyword: {keyword}")]
    Pattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read keyword store at {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write keyword store at {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not determine a config directory for the keyword store")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
