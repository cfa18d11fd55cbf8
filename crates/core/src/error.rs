use thiserror::Error;

use crate::nav::SectionId;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("unknown section `{0}`")]
    UnknownSection(String),

    #[error("section `{0}` is not present on this page")]
    MissingSection(SectionId),

    #[error("no card with index {0}")]
    UnknownCard(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PageError>;
