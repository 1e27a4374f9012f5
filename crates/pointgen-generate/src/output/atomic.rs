use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Replace `path` with `data` via a sibling `.tmp` file and a rename.
///
/// Readers see either the previous file or the complete new one. The temp file
/// is removed when any step before the rename fails.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir)?;
    }

    let tmp_path = temp_path(path)?;
    let written = write_synced(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    match parent {
        Some(dir) => sync_dir(dir),
        None => Ok(()),
    }
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pointgen_atomic_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn replaces_existing_file_and_leaves_no_temp() {
        let dir = scratch_dir();
        let path = dir.join("SIEMENS_20250101000000.csv");
        fs::write(&path, b"old").unwrap();

        write_bytes_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path(&path).unwrap().exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = scratch_dir();
        // A non-empty directory at the target makes the rename fail.
        let path = dir.join("AB_20250101000000.csv");
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(write_bytes_atomic(&path, b"rows").is_err());

        assert!(!temp_path(&path).unwrap().exists());
        assert!(path.is_dir());
        let _ = fs::remove_dir_all(&dir);
    }
}
