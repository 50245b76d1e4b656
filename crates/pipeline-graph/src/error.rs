use thiserror::Error;

/// All possible errors that can occur while decoding a pipeline
#[derive(Error, Debug)]
pub enum GraphError {
    /// Errors that occur during JSON processing
    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GraphError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GraphError::JsonError(_) => "ERR_PIPELINE_JSON_PARSE",
        }
    }
}
