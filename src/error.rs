use std::{fmt, path::PathBuf};

use thiserror::Error;

/// The step of a run that an external command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    Build,
    WebBuild,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Configure => "CMake configuration",
            Phase::Build => "Build",
            Phase::WebBuild => "Web build",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{phase} failed (exit code: {})", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed { phase: Phase, code: Option<i32> },

    #[error("{program} not found in path")]
    ToolNotFound { program: String },

    #[error("CMake preset error: {message}")]
    Preset { message: String },

    #[error("directory not found: {}", .path.display())]
    MissingDirectory { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// Short message naming the failed phase, e.g. `Build failed`.
    pub fn summary(&self) -> String {
        match self {
            Error::CommandFailed { phase, .. } => format!("{phase} failed"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
