use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use uuid::Uuid;

use super::collection::Collection;
use super::db_file::{read_db, write_db};
use super::song::Song;
use super::utils::{with_db_extension, write_file};
use crate::error::{LibraryError, Result};

/// The key a [Catalog::query] result is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Artist,
    Size,
    Duration,
}

impl SortKey {
    fn compare(&self, a: &Song, b: &Song) -> Ordering {
        match self {
            SortKey::Title => cmp_ignore_case(&a.title, &b.title),
            SortKey::Artist => cmp_ignore_case(&a.artist, &b.artist),
            SortKey::Size => a.size_kb.cmp(&b.size_kb),
            SortKey::Duration => a.duration.cmp(&b.duration),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Every song known to the program
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Collection<Song>,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a song, refusing it if the catalog already has an equal one
    /// (same title and artist, ignoring case)
    pub fn add_song(&mut self, song: Song) -> Result<usize> {
        song.validate()?;
        if self.songs.iter().any(|existing| existing == &song) {
            debug!("rejected duplicate {} - {}", song.artist, song.title);
            return Err(LibraryError::DuplicateSong {
                title: song.title,
                artist: song.artist,
            });
        }

        Ok(self.songs.add(song))
    }

    /// Removes a song from the catalog, returning it.
    ///
    /// Playlists holding the song are not touched here; see
    /// [Controller::remove_song](crate::music_controller::controller::Controller::remove_song)
    pub fn remove_song(&mut self, index: usize) -> Result<Song> {
        self.songs.remove_at(index)
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Song> {
        self.songs.get_mut(index)
    }

    /// Returns the library size in number of tracks
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.songs.capacity()
    }

    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn index_of(&self, uuid: &Uuid) -> Option<usize> {
        self.songs.index_of(uuid)
    }

    /// Queries for a [Song] by its [Uuid], returning the song along with
    /// its position in the catalog
    pub fn query_uuid(&self, uuid: &Uuid) -> Option<(&Song, usize)> {
        let index = self.songs.index_of(uuid)?;
        self.songs.get(index).map(|song| (song, index))
    }

    /// Exact, case-sensitive lookup by title and artist
    pub fn contains(&self, title: &str, artist: &str) -> bool {
        self.songs.iter().any(|song| song.is_exact(title, artist))
    }

    /// Returns every song shorter than `max_duration` seconds, ordered by `sort_by`.
    ///
    /// Text keys compare without case; songs with equal keys keep their
    /// catalog order.
    pub fn query(&self, max_duration: u64, sort_by: SortKey) -> Vec<&Song> {
        let mut songs: Vec<&Song> = self
            .songs
            .iter()
            .filter(|song| song.duration < max_duration)
            .collect();

        songs.sort_by(|a, b| sort_by.compare(a, b));
        songs
    }

    /// Loads every song from a song database that is not already here,
    /// returning how many were added.
    ///
    /// The whole text is parsed before anything is inserted, so a malformed
    /// file leaves the catalog as it was.
    pub fn load_str(&mut self, text: &str) -> Result<usize> {
        let records = read_db(text)?;
        let total = records.len();

        let mut count = 0;
        for song in records {
            if self.contains(&song.title, &song.artist) {
                debug!("skipping {} - {}, already loaded", song.artist, song.title);
                continue;
            }
            self.songs.add(song);
            count += 1;
        }

        debug!("loaded {count} of {total} records");
        Ok(count)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let count = self.load_str(&text)?;
        info!("loaded {count} new songs from {}", path.display());
        Ok(count)
    }

    pub fn save_string(&self) -> String {
        write_db(self.songs.iter())
    }

    /// Writes the catalog out as a song database, adding a `.txt`
    /// extension if the path lacks one. Returns where it was written.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = with_db_extension(path.as_ref());
        write_file(&self.save_string(), &path)?;
        info!("saved {} songs to {}", self.len(), path.display());
        Ok(path)
    }
}
