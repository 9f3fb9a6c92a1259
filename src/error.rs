use thiserror::Error;

/// Failure kinds for one file's trip through the pipeline. Every variant is
/// caught at the orchestrator's per-file boundary and turned into a failed
/// outcome; none of them aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("document contains no translatable text")]
    EmptyContent,

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("write failed: {0}")]
    Write(String),
}
