use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Writes `data` to `path` by staging it in a sibling temp file and renaming,
/// so a failed write never truncates the existing file.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let path = Path::new("/data/catalog.json");
        assert_eq!(tmp_path(path), PathBuf::from("/data/catalog.json.tmp"));
    }

    #[test]
    fn failed_write_preserves_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_atomic(&path, "original").unwrap();

        // A directory squatting on the temp name makes File::create fail.
        fs::create_dir_all(tmp_path(&path)).unwrap();
        assert!(write_atomic(&path, "replacement").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }
}
