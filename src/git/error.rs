//! Errors raised while talking to git and attributing files.

use thiserror::Error;

/// Errors that can occur in the attribution phase
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status} (stderr: {stderr})")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("malformed blame report at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("blame failed for file {file}")]
    Blame {
        file: String,
        #[source]
        source: Box<GitError>,
    },

    #[error("attribution worker panicked")]
    WorkerPanicked,
}

impl GitError {
    /// Wrap an error with the file it was raised for.
    pub fn for_file(file: &str, source: GitError) -> Self {
        GitError::Blame {
            file: file.to_string(),
            source: Box::new(source),
        }
    }
}

pub type GitResult<T> = Result<T, GitError>;
