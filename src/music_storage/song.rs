use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Handle;
use crate::error::{LibraryError, Result};

/// Stores information about a single song
///
/// Two songs are equal when their title and artist match ignoring case.
/// The `uuid` is the song's handle; it is what playlists store and what
/// identity lookups compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub(crate) uuid: Uuid,
    pub(crate) title: String,
    pub(crate) artist: String,
    /// File size in kilobytes
    pub(crate) size_kb: u64,
    /// Duration in seconds
    pub(crate) duration: u64,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        size_kb: u64,
        duration: u64,
    ) -> Self {
        Song {
            uuid: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            size_kb,
            duration,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn size_kb(&self) -> u64 {
        self.size_kb
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.artist = artist.into();
    }

    /// Case-sensitive match on both title and artist
    pub fn is_exact(&self, title: &str, artist: &str) -> bool {
        self.title == title && self.artist == artist
    }

    /// Checks that the song can be stored and written back out
    pub fn validate(&self) -> Result<()> {
        validate_text(&self.title, &self.artist)?;
        if self.size_kb == 0 {
            return Err(LibraryError::InvalidSong(
                "file size must be greater than zero".into(),
            ));
        }
        if self.duration == 0 {
            return Err(LibraryError::InvalidSong(
                "duration must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Checks a title and artist pair can be written one per line
pub(crate) fn validate_text(title: &str, artist: &str) -> Result<()> {
    check_text("title", title)?;
    check_text("artist", artist)
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LibraryError::InvalidSong(format!("{field} must have a value")));
    }
    if value.contains(['\n', '\r']) {
        return Err(LibraryError::InvalidSong(format!(
            "{field} cannot contain line breaks"
        )));
    }
    Ok(())
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.title, &other.title) && eq_ignore_case(&self.artist, &other.artist)
    }
}

impl Eq for Song {}

impl Handle for Song {
    fn handle(&self) -> Uuid {
        self.uuid
    }
}
