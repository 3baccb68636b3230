//! The controller ties the catalog and the playlists built from it together.
//!
//! Anything that has to keep both consistent, like removing a song from the
//! catalog and every playlist at once, goes through [Controller].

use std::path::{Path, PathBuf};

use log::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{LibraryError, Result};
use crate::music_storage::{
    catalog::Catalog,
    collection::Collection,
    playlist::Playlist,
    song::{eq_ignore_case, validate_text, Song},
    utils::find_databases,
};

#[derive(Debug, Default)]
pub struct Controller {
    pub config: Config,
    pub catalog: Catalog,
    pub playlists: Collection<Playlist>,
}

impl Controller {
    /// Creates an empty controller, refusing a config whose playlist
    /// budgets are zero
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Controller {
            config,
            catalog: Catalog::new(),
            playlists: Collection::new(),
        })
    }

    pub fn add_song(&mut self, song: Song) -> Result<usize> {
        self.catalog.add_song(song)
    }

    /// Removes a song from the catalog and from every playlist holding it
    pub fn remove_song(&mut self, index: usize) -> Result<Song> {
        let song = self.catalog.remove_song(index)?;
        let uuid = song.uuid();

        for playlist in self.playlists.iter_mut() {
            while let Some(i) = playlist.index_of(&uuid) {
                playlist.remove_song(i)?;
                debug!("removed {uuid} from playlist {}", playlist.title());
            }
        }

        Ok(song)
    }

    /// Changes a song's title and artist in place. Playlists see the change
    /// since they refer to the song by handle.
    pub fn edit_song(&mut self, index: usize, title: &str, artist: &str) -> Result<()> {
        let len = self.catalog.len();
        let uuid = self
            .catalog
            .get(index)
            .map(Song::uuid)
            .ok_or(LibraryError::InvalidIndex { index, len })?;

        validate_text(title, artist)?;
        let taken = self.catalog.songs().any(|song| {
            song.uuid() != uuid
                && eq_ignore_case(song.title(), title)
                && eq_ignore_case(song.artist(), artist)
        });
        if taken {
            return Err(LibraryError::DuplicateSong {
                title: title.to_string(),
                artist: artist.to_string(),
            });
        }

        if let Some(song) = self.catalog.get_mut(index) {
            song.set_title(title);
            song.set_artist(artist);
        }
        Ok(())
    }

    /// Creates an empty playlist using the configured budgets, returning its index
    pub fn create_playlist(&mut self, title: impl Into<String>) -> usize {
        let budget = self.config.playlist;
        let playlist = Playlist::with_budget(title, budget.max_time, budget.max_size);
        debug!("created playlist {}", playlist.title());
        self.playlists.add(playlist)
    }

    /// Removes a playlist. The songs it held stay in the catalog.
    pub fn remove_playlist(&mut self, index: usize) -> Result<Playlist> {
        self.playlists.remove_at(index)
    }

    pub fn playlist(&self, index: usize) -> Option<&Playlist> {
        self.playlists.get(index)
    }

    pub fn playlist_mut(&mut self, index: usize) -> Option<&mut Playlist> {
        self.playlists.get_mut(index)
    }

    pub fn playlist_index(&self, uuid: &Uuid) -> Option<usize> {
        self.playlists.index_of(uuid)
    }

    /// Adds the catalog song at `song` to the playlist at `playlist`
    pub fn add_to_playlist(&mut self, playlist: usize, song: usize) -> Result<usize> {
        let uuid = self
            .catalog
            .get(song)
            .map(Song::uuid)
            .ok_or(LibraryError::InvalidIndex {
                index: song,
                len: self.catalog.len(),
            })?;

        let len = self.playlists.len();
        let list = self
            .playlists
            .get_mut(playlist)
            .ok_or(LibraryError::InvalidIndex { index: playlist, len })?;
        list.add_song(uuid, &self.catalog)
    }

    pub fn remove_from_playlist(&mut self, playlist: usize, index: usize) -> Result<Uuid> {
        let len = self.playlists.len();
        self.playlists
            .get_mut(playlist)
            .ok_or(LibraryError::InvalidIndex { index: playlist, len })?
            .remove_song(index)
    }

    /// Loads new songs from a song database file
    pub fn load_database(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.catalog.load_file(path)
    }

    /// Saves the catalog, returning the final path written
    pub fn save_database(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.catalog.save_file(path)
    }

    /// Song database files found in the configured folder
    pub fn databases(&self) -> Vec<PathBuf> {
        let found = find_databases(&self.config.database_folder);
        info!(
            "found {} databases in {}",
            found.len(),
            self.config.database_folder.display()
        );
        found
    }
}
