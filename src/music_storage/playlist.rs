use log::debug;
use uuid::Uuid;

use super::catalog::Catalog;
use super::collection::{Collection, Handle};
use super::song::Song;
use crate::error::{LibraryError, Result};

/// Default cap on a playlist's total running time, in seconds
pub const MAX_TIME: u64 = 60 * 25;
/// Default cap on a playlist's total size, in kilobytes
pub const MAX_SIZE: u64 = 512;

/// A named selection of catalog songs, bounded by a total running time and
/// a total size.
///
/// Songs are held by handle. Totals are summed from the catalog on every
/// call, so they always reflect the records as they are now.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub(crate) uuid: Uuid,
    pub(crate) title: String,
    pub(crate) tracks: Collection<Uuid>,
    max_time: u64,
    max_size: u64,
}

impl Default for Playlist {
    fn default() -> Self {
        Playlist::with_budget(String::default(), MAX_TIME, MAX_SIZE)
    }
}

impl Handle for Playlist {
    fn handle(&self) -> Uuid {
        self.uuid
    }
}

impl Playlist {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_budget(title: impl Into<String>, max_time: u64, max_size: u64) -> Self {
        Playlist {
            uuid: Uuid::new_v4(),
            title: title.into(),
            tracks: Collection::new(),
            max_time,
            max_size,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn max_time(&self) -> u64 {
        self.max_time
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Adds a catalog song to the end of the playlist if it fits in both
    /// budgets, returning its position. Running time is checked first.
    ///
    /// Totals saturate at `u64::MAX`, which never fits.
    pub fn add_song(&mut self, uuid: Uuid, catalog: &Catalog) -> Result<usize> {
        let (song, _) = catalog
            .query_uuid(&uuid)
            .ok_or(LibraryError::SongNotFound(uuid))?;

        let total = self.total_duration(catalog).saturating_add(song.duration());
        if total > self.max_time || total == u64::MAX {
            debug!("{} - {} would run {total}s", song.artist(), song.title());
            return Err(LibraryError::DurationBudgetExceeded {
                total,
                max: self.max_time,
            });
        }

        let total = self.total_size(catalog).saturating_add(song.size_kb());
        if total > self.max_size || total == u64::MAX {
            debug!("{} - {} would take {total}kB", song.artist(), song.title());
            return Err(LibraryError::SizeBudgetExceeded {
                total,
                max: self.max_size,
            });
        }

        Ok(self.tracks.add(uuid))
    }

    pub fn remove_song(&mut self, index: usize) -> Result<Uuid> {
        self.tracks.remove_at(index)
    }

    pub fn get(&self, index: usize) -> Option<&Uuid> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Uuid> {
        self.tracks.iter()
    }

    /// Resolves the playlist's handles against the catalog, in order
    pub fn songs<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Song> {
        self.tracks
            .iter()
            .filter_map(|uuid| catalog.query_uuid(uuid).map(|(song, _)| song))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index_of(&self, uuid: &Uuid) -> Option<usize> {
        self.tracks.index_of(uuid)
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.index_of(uuid).is_some()
    }

    /// Total running time of the playlist in seconds
    pub fn total_duration(&self, catalog: &Catalog) -> u64 {
        self.songs(catalog)
            .fold(0, |total, song| total.saturating_add(song.duration()))
    }

    /// Total size of the playlist in kilobytes
    pub fn total_size(&self, catalog: &Catalog) -> u64 {
        self.songs(catalog)
            .fold(0, |total, song| total.saturating_add(song.size_kb()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(catalog: &mut Catalog, title: &str, size: u64, duration: u64) -> Uuid {
        let index = catalog
            .add_song(Song::new(title, "Artist", size, duration))
            .unwrap();
        catalog.get(index).unwrap().uuid()
    }

    #[test]
    fn defaults() {
        let playlist = Playlist::new();
        assert_eq!(playlist.max_time(), 1500);
        assert_eq!(playlist.max_size(), 512);
        assert!(playlist.is_empty());
    }

    #[test]
    fn rejects_over_duration() {
        let mut catalog = Catalog::new();
        let long = add(&mut catalog, "Long", 10, 1400);
        let short = add(&mut catalog, "Short", 10, 200);

        let mut playlist = Playlist::new();
        assert_eq!(playlist.add_song(long, &catalog).unwrap(), 0);
        assert!(matches!(
            playlist.add_song(short, &catalog),
            Err(LibraryError::DurationBudgetExceeded { total: 1600, max: 1500 })
        ));
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.total_duration(&catalog), 1400);
    }

    #[test]
    fn budgets_are_inclusive() {
        let mut catalog = Catalog::new();
        let a = add(&mut catalog, "A", 256, 750);
        let b = add(&mut catalog, "B", 256, 750);

        let mut playlist = Playlist::new();
        playlist.add_song(a, &catalog).unwrap();
        playlist.add_song(b, &catalog).unwrap();
        assert_eq!(playlist.total_duration(&catalog), 1500);
        assert_eq!(playlist.total_size(&catalog), 512);
    }

    #[test]
    fn rejects_over_size() {
        let mut catalog = Catalog::new();
        let big = add(&mut catalog, "Big", 500, 10);
        let more = add(&mut catalog, "More", 13, 10);

        let mut playlist = Playlist::new();
        playlist.add_song(big, &catalog).unwrap();
        assert!(matches!(
            playlist.add_song(more, &catalog),
            Err(LibraryError::SizeBudgetExceeded { total: 513, max: 512 })
        ));
        assert_eq!(playlist.total_size(&catalog), 500);
    }

    #[test]
    fn duration_is_checked_before_size() {
        let mut catalog = Catalog::new();
        let huge = add(&mut catalog, "Huge", 10_000, 10_000);

        let mut playlist = Playlist::new();
        assert!(matches!(
            playlist.add_song(huge, &catalog),
            Err(LibraryError::DurationBudgetExceeded { .. })
        ));
    }

    #[test]
    fn custom_budget() {
        let mut catalog = Catalog::new();
        let a = add(&mut catalog, "A", 5, 60);

        let mut playlist = Playlist::with_budget("Tiny", 59, 100);
        assert_eq!(playlist.title(), "Tiny");
        assert!(playlist.add_song(a, &catalog).is_err());
    }

    #[test]
    fn unknown_song_is_rejected() {
        let catalog = Catalog::new();
        let mut playlist = Playlist::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            playlist.add_song(missing, &catalog),
            Err(LibraryError::SongNotFound(uuid)) if uuid == missing
        ));
    }

    const OVERSIZED: &str = "SongDatabase File
Song 1
Small
Artist
1kB
10
Song 2
Huge File
Artist
18446744073709551615kB
10
Song 3
Endless
Artist
1kB
18446744073709551615
";

    fn loaded(catalog: &Catalog, title: &str) -> Uuid {
        catalog
            .songs()
            .find(|song| song.title() == title)
            .map(Song::uuid)
            .unwrap()
    }

    #[test]
    fn huge_size_does_not_wrap_past_budget() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.load_str(OVERSIZED).unwrap(), 3);

        let mut playlist = Playlist::new();
        playlist.add_song(loaded(&catalog, "Small"), &catalog).unwrap();
        assert!(matches!(
            playlist.add_song(loaded(&catalog, "Huge File"), &catalog),
            Err(LibraryError::SizeBudgetExceeded { total: u64::MAX, max: 512 })
        ));
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.total_size(&catalog), 1);
    }

    #[test]
    fn huge_duration_does_not_wrap_past_budget() {
        let mut catalog = Catalog::new();
        catalog.load_str(OVERSIZED).unwrap();

        let mut playlist = Playlist::new();
        playlist.add_song(loaded(&catalog, "Small"), &catalog).unwrap();
        assert!(matches!(
            playlist.add_song(loaded(&catalog, "Endless"), &catalog),
            Err(LibraryError::DurationBudgetExceeded { total: u64::MAX, max: 1500 })
        ));
        assert_eq!(playlist.total_duration(&catalog), 10);
    }

    #[test]
    fn totals_saturate() {
        let mut catalog = Catalog::new();
        catalog.load_str(OVERSIZED).unwrap();

        // Unbounded budgets still refuse a total that cannot be represented
        let mut playlist = Playlist::with_budget("Unbounded", u64::MAX, u64::MAX);
        playlist.tracks.add(loaded(&catalog, "Huge File"));
        playlist.tracks.add(loaded(&catalog, "Huge File"));
        assert_eq!(playlist.total_size(&catalog), u64::MAX);
        assert!(matches!(
            playlist.add_song(loaded(&catalog, "Small"), &catalog),
            Err(LibraryError::SizeBudgetExceeded { .. })
        ));
    }

    #[test]
    fn totals_follow_the_catalog() {
        let mut catalog = Catalog::new();
        let a = add(&mut catalog, "A", 100, 100);
        let b = add(&mut catalog, "B", 50, 300);

        let mut playlist = Playlist::new();
        playlist.add_song(a, &catalog).unwrap();
        playlist.add_song(b, &catalog).unwrap();
        assert_eq!(playlist.total_duration(&catalog), 400);
        assert_eq!(playlist.total_size(&catalog), 150);

        assert_eq!(playlist.index_of(&b), Some(1));
        assert_eq!(playlist.remove_song(0).unwrap(), a);
        assert_eq!(playlist.index_of(&b), Some(0));
        assert_eq!(playlist.total_duration(&catalog), 300);
        assert!(playlist.remove_song(1).is_err());

        // A handle whose song left the catalog adds nothing to the totals
        catalog.remove_song(catalog.index_of(&b).unwrap()).unwrap();
        assert_eq!(playlist.total_duration(&catalog), 0);
        assert_eq!(playlist.total_size(&catalog), 0);
    }
}
