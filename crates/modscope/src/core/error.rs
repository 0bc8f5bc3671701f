//! Core error types for diagram generation
//!
//! Only conditions that abort a whole diagram build live here. Data-shape
//! anomalies found while walking the metadata are recorded as
//! [`Diagnostic`](super::Diagnostic)s instead and never surface as errors.

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown module: {name}")]
    UnknownModule { name: String },

    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String, log: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown diagram kind: {kind}")]
    UnknownDiagramKind { kind: String },
}

impl DiagramError {
    /// Create a new unknown module error
    pub fn unknown_module(name: impl Into<String>) -> Self {
        Self::UnknownModule { name: name.into() }
    }

    /// Create a new snapshot error
    pub fn snapshot_error(message: String) -> Self {
        Self::SnapshotError { message }
    }

    /// Create a new config error
    pub fn config_error(message: String) -> Self {
        Self::ConfigError { message }
    }

    /// Create a new render error carrying the renderer log collected so far
    pub fn render_error(message: String, log: String) -> Self {
        Self::RenderError { message, log }
    }

    /// Renderer output captured before the failure, if any
    pub fn log(&self) -> Option<&str> {
        match self {
            Self::RenderError { log, .. } => Some(log),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot_error(err.to_string())
    }
}
