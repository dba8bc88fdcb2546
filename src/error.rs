use std::path::PathBuf;

pub type GridResult<T> = Result<T, GridError>;

#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error("data not found: '{}': {source}", path.display())]
    DataNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {context}: {message}")]
    MalformedData { context: String, message: String },

    #[error("session '{session}' references missing speaker '{speaker}'")]
    MissingSpeaker { session: String, speaker: String },

    #[error("image not found: '{}'", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridError {
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedData {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
