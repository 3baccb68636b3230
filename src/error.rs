use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Song already in database: {artist} - {title}")]
    DuplicateSong { title: String, artist: String },
    #[error("Playlist would run {total}s, over the {max}s limit")]
    DurationBudgetExceeded { total: u64, max: u64 },
    #[error("Playlist would take {total}kB, over the {max}kB limit")]
    SizeBudgetExceeded { total: u64, max: u64 },
    #[error("Index out of bounds! Index {index} is over len {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("Malformed song database at line {line}: {reason}")]
    MalformedFile { line: usize, reason: String },
    #[error("Invalid song: {0}")]
    InvalidSong(String),
    #[error("No song found for {0}")]
    SongNotFound(Uuid),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LibraryError::MalformedFile {
            line,
            reason: reason.into(),
        }
    }
}
