pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("missing required input: {0}")]
    Config(String),

    #[error("invalid glob pattern: {0}")]
    Pattern(String),

    #[error("upload of '{key}' failed: {reason}")]
    Upload { key: String, reason: String },

    #[error("invalidation failed: {0}")]
    Invalidation(String),

    #[error("path '{path}' is not under root '{root}'")]
    OutsideRoot { path: String, root: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    Walk(#[from] ignore::Error),
}
