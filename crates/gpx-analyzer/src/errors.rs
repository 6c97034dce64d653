use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("GPX parsing error: {0}")]
    Parse(String),

    #[error("GPX file contains no track points")]
    EmptyTrack,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<gpx::errors::GpxError> for AnalyzerError {
    fn from(e: gpx::errors::GpxError) -> Self {
        AnalyzerError::Parse(e.to_string())
    }
}
