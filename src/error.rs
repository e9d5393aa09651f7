use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Файл с экспортом не найден или не открывается.
    #[error("cannot read {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Io(#[from] io::Error),

    /// Строка не разбирается как CSV.
    #[error("malformed record at line {line}: {message}")]
    InvalidFormat { line: u64, message: String },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, |pos| pos.line());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(err) => ParseError::Io(err),
            _ => ParseError::InvalidFormat { line, message },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("write error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
