//! Error taxonomy shared by every stage of the pipeline.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {}: {message}", path.display())]
    InputMalformed { path: PathBuf, message: String },

    #[error("no colour defined for key {0:?}")]
    PaletteKeyMissing(String),

    #[error("cannot list output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free output name for {stem:?} in {} (tried 1..={limit})", dir.display())]
    OutputExhausted {
        dir: PathBuf,
        stem: String,
        limit: u32,
    },

    #[error("render failed: {0}")]
    RenderFailure(String),
}

impl Error {
    /// Map an I/O failure on an input file. A missing file and undecodable
    /// contents (e.g. invalid UTF-8) get their own variants.
    pub fn from_input_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound { path },
            std::io::ErrorKind::InvalidData => Self::InputMalformed {
                path,
                message: source.to_string(),
            },
            _ => Self::Io { path, source },
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::InputMalformed {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
