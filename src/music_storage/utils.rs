use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// The extension song database files are saved with
pub const DB_EXTENSION: &str = "txt";

/// Appends `.txt` to a path that does not already end in it
pub fn with_db_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == DB_EXTENSION) {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(DB_EXTENSION);
    PathBuf::from(name)
}

/// Write text out to a file by way of a temporary sibling, so a failed
/// write never leaves a half written database behind
pub(super) fn write_file(contents: &str, path: &Path) -> std::io::Result<()> {
    // Create a temporary name for writing out
    let mut writer_name = PathBuf::from(path);
    writer_name.set_extension("tmp");

    let mut writer = BufWriter::new(File::create(&writer_name)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    drop(writer);

    fs::rename(writer_name, path)?;
    Ok(())
}

/// Lists the song database candidates in a folder: files directly inside it
/// ending in `.txt` (any case), sorted by path
pub fn find_databases(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DB_EXTENSION))
        })
        .collect();

    found.sort();
    found
}
