use std::path::PathBuf;

/// Infrastructure failures of the pipeline. Language-level problems are
/// never errors; they are diagnostics on the analysis result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read input file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
