use std::path::PathBuf;

// -----------------------------------------------------------------------------
// Error
// -----------------------------------------------------------------------------
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Fail to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported file '{}'. Expected either of .yaml, .yml, .json", .0.display())]
    UnsupportedFormat(PathBuf),
}
