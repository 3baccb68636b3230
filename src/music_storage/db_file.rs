//! The plain text song database format.
//!
//! ```text
//! SongDatabase File
//! Song 1
//! <title>
//! <artist>
//! <size>kB
//! <duration>
//! ```
//!
//! One `Song <n>` block follows the header for every song, `n` counting from 1
//! in storage order. The ordinal is positional only and is ignored on read.

use super::song::Song;
use crate::error::{LibraryError, Result};

pub const HEADER: &str = "SongDatabase File";
const MARKER: &str = "Song ";
const SIZE_SUFFIX: &str = "kB";

/// Writes out every song in order as a song database
pub fn write_db<'a>(songs: impl IntoIterator<Item = &'a Song>) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for (i, song) in songs.into_iter().enumerate() {
        out.push_str(&format!(
            "{MARKER}{}\n{}\n{}\n{}{SIZE_SUFFIX}\n{}\n",
            i + 1,
            song.title,
            song.artist,
            song.size_kb,
            song.duration
        ));
    }

    out
}

/// Reads every record out of a song database.
///
/// Lines outside of a record block are skipped. Each returned song has a
/// freshly minted handle.
pub fn read_db(text: &str) -> Result<Vec<Song>> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    match lines.next() {
        Some((_, HEADER)) => (),
        _ => return Err(LibraryError::malformed(1, "not a SongDatabase file")),
    }

    let mut songs = Vec::new();
    while let Some((line_no, line)) = lines.next() {
        if !is_marker(line) {
            continue;
        }

        let mut field = |name: &str| {
            lines.next().ok_or_else(|| {
                LibraryError::malformed(
                    line_no,
                    format!("record ends before its {name} line"),
                )
            })
        };

        let (_, title) = field("title")?;
        let (_, artist) = field("artist")?;
        let (size_line, size) = field("size")?;
        let (duration_line, duration) = field("duration")?;

        let size_kb = size
            .strip_suffix(SIZE_SUFFIX)
            .ok_or_else(|| {
                LibraryError::malformed(size_line, format!("size {size:?} lacks the kB suffix"))
            })
            .and_then(|n| parse_number(size_line, "size", n))?;
        let duration = parse_number(duration_line, "duration", duration)?;

        songs.push(Song::new(title, artist, size_kb, duration));
    }

    Ok(songs)
}

fn is_marker(line: &str) -> bool {
    line.strip_prefix(MARKER)
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_number(line: usize, name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| LibraryError::malformed(line, format!("{name} {value:?} is not a number")))
}
