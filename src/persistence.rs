// File: src/persistence.rs
use crate::core::dictionary::LevelDictionary;
use crate::errors::{LevelError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Bumped whenever the serialized layout of [`LevelDictionary`] changes.
pub const SNAPSHOT_VERSION: u32 = 1;

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Writes `write` to a temp file next to `path`, then renames it into place,
/// so readers never see a half-written file.
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent = parent_dir(path);
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

/// Saves a validated dictionary as a binary snapshot.
pub fn save_snapshot(dictionary: &LevelDictionary, path: &Path) -> Result<()> {
    write_atomic(path, |writer| {
        bincode::serialize_into(&mut *writer, &SNAPSHOT_VERSION)?;
        bincode::serialize_into(&mut *writer, dictionary)?;
        Ok(())
    })?;
    tracing::info!(path = %path.display(), words = dictionary.len(), "saved dictionary snapshot");
    Ok(())
}

/// Loads a snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<LevelDictionary> {
    let load = || -> Result<LevelDictionary> {
        let mut reader = BufReader::new(File::open(path)?);
        let version: u32 = bincode::deserialize_from(&mut reader)?;
        if version != SNAPSHOT_VERSION {
            return Err(LevelError::SnapshotVersion {
                found: version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(bincode::deserialize_from(&mut reader)?)
    };
    let dictionary = load().map_err(|e| LevelError::dictionary_load(path, e))?;
    tracing::info!(
        path = %path.display(),
        family = %dictionary.family(),
        words = dictionary.len(),
        "loaded dictionary snapshot"
    );
    Ok(dictionary)
}

/// Writes a text file atomically.
pub fn save_text(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, |writer| {
        writer.write_all(contents.as_bytes())?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::WordListFamily;
    use crate::core::pos::CanonicalPos;
    use crate::core::types::Rule;

    #[test]
    fn snapshot_reloads_identical_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("new_hsk.bin");
        let dictionary = LevelDictionary::from_entries(
            WordListFamily::NewHsk,
            [
                ("跑", vec![Rule::with_pos("NEW_HSK2", [CanonicalPos::Verb]), Rule::any_pos("NEW_HSK4")]),
                ("你好", vec![Rule::any_pos("NEW_HSK1")]),
            ],
        )
        .unwrap();

        save_snapshot(&dictionary, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, dictionary);
        assert_eq!(loaded.family(), WordListFamily::NewHsk);
    }

    #[test]
    fn foreign_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.bin");
        fs::write(&path, bincode::serialize(&(SNAPSHOT_VERSION + 1)).unwrap()).unwrap();

        match load_snapshot(&path).unwrap_err() {
            LevelError::DictionaryLoad { source, .. } => {
                assert!(matches!(*source, LevelError::SnapshotVersion { found: 2, expected: 1 }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn save_text_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_seg.txt");
        save_text(&path, "旧/a").unwrap();
        save_text(&path, "我/r 爱/v").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "我/r 爱/v");
    }
}
