use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invalid recalibration mode '{0}' (expected 'test' or 'production')")]
    InvalidMode(String),

    #[error("Missing table: {0}")]
    MissingTable(String),

    #[error("Storage Error: {0}")]
    Storage(String),
}

impl SkillForgeError {
    /// Setup guidance for backend failures the operator can fix by hand.
    pub fn setup_hint(&self) -> Option<String> {
        match self {
            SkillForgeError::MissingTable(name) => Some(format!(
                "The '{}' table does not exist yet. Create it in the backing store \
                 (an empty list is enough) and run the command again.",
                name
            )),
            _ => None,
        }
    }
}

pub type SfResult<T> = Result<T, SkillForgeError>;
