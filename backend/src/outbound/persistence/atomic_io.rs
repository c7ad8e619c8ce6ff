//! Atomic document writes.
//!
//! The document is written to a hidden temporary file in the same directory,
//! synced, then renamed over the target so the target is never partially
//! written.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to `file_name` inside `dir` atomically.
///
/// # Errors
/// Returns the underlying I/O error when the temp file cannot be created,
/// written, synced or renamed. The temp file is removed on failure.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        discard_temp(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &tmp_name, file_name) {
        discard_temp(dir, &tmp_name);
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn discard_temp(dir: &Dir, tmp_name: &str) {
    match dir.remove_file(tmp_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(error = %err, tmp_name, "failed to remove temporary talker document");
        }
    }
}

fn sync_directory(dir: &Dir) {
    // Best effort: not every platform can fsync a directory handle.
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        tracing::debug!(error = %err, "directory sync skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;

    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open dir");
        (tmp, dir)
    }

    #[test]
    fn replaces_existing_contents() {
        let (_tmp, dir) = temp_dir();
        write_atomic(&dir, "talker.json", "[1]").expect("first write");
        write_atomic(&dir, "talker.json", "[2]").expect("second write");
        assert_eq!(dir.read_to_string("talker.json").expect("read"), "[2]");
    }

    #[test]
    fn leaves_no_temporary_files_behind() {
        let (_tmp, dir) = temp_dir();
        write_atomic(&dir, "talker.json", "[]").expect("write");
        let names: Vec<String> = dir
            .entries()
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["talker.json".to_owned()]);
    }
}
