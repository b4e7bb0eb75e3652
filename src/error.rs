use thiserror::Error;

#[derive(Error, Debug)]
pub enum MicroBioError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("No item with id '{0}'. Run `microbiobase list` to see available ids")]
    ItemNotFound(String),

    #[error("No favorited items to export.")]
    NoFavorites,

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Interactive session error: {0}")]
    Interactive(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] microbiobase_common::Error),
}

pub type Result<T> = std::result::Result<T, MicroBioError>;
