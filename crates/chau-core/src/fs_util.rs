//! Atomic file replacement shared by the JSON store and the config manager.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = "tmp";

/// Sibling path the data is staged in before it replaces `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to [`tmp_path`] and renames it over `path`.
///
/// The previous contents of `path` stay in place if any step fails.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let tmp = tmp_path(path);
    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let tmp = tmp_path(Path::new("/data/chau_money_transactions.json"));
        assert_eq!(tmp, PathBuf::from("/data/chau_money_transactions.json.tmp"));
        assert_eq!(tmp_path(Path::new("/data/raw")), PathBuf::from("/data/raw.tmp"));
    }

    #[test]
    fn write_atomic_replaces_contents_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.json");

        write_atomic(&path, "[1]").unwrap();
        write_atomic(&path, "[2]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[2]");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        write_atomic(&path, "kept").unwrap();
        fs::create_dir_all(tmp_path(&path)).unwrap();

        assert!(write_atomic(&path, "lost").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }
}
