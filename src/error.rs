use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a render run. There are no others: the diagram itself
/// is fixed and cannot be malformed.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// The Graphviz engine is missing, not runnable, or produced nothing.
    #[error("rendering engine `{program}` unavailable: {reason}")]
    RenderingUnavailable { program: String, reason: String },

    #[error("cannot write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    pub fn rendering_unavailable(program: impl Into<String>, reason: impl Into<String>) -> Self {
        DiagramError::RenderingUnavailable {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiagramError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
