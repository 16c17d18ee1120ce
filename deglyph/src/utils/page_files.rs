// deglyph/src/utils/page_files.rs
//! Page-file enumeration and in-place rewriting.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const TMP_SUFFIX: &str = ".deglyph.tmp";

/// Normalizes a user-supplied extension: `.tsx`, `tsx` and ` tsx ` all become `tsx`.
pub fn normalize_extension(ext: &str) -> &str {
    ext.trim().trim_start_matches('.')
}

/// Lists the regular files directly inside `dir` whose extension is exactly
/// `extension`, sorted by path. Subdirectories are not descended into.
pub fn list_page_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = normalize_extension(extension);
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read page directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if path.extension() != Some(OsStr::new(extension)) {
            continue;
        }
        if !path.is_file() {
            debug!("Skipping non-file {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort();
    debug!("Found {} .{} files in {}", files.len(), extension, dir.display());
    Ok(files)
}

/// Reads a page as UTF-8 text.
pub fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}{TMP_SUFFIX}"))
}

/// Replaces the content of `path` with `content`.
///
/// The new content is written to a sibling temporary file which is then
/// renamed over the original, so a failed write never leaves a half-written
/// page behind. The original file's permissions are carried over. A symlinked
/// page is written through: the link target is replaced, the link is kept.
pub fn write_page_atomic(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let path = target.as_path();
    let tmp_path = tmp_path_for(path);
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();

    let result = (|| -> Result<()> {
        let mut tmp = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .with_context(|| format!("Failed to create temporary file {}", tmp_path.display()))?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.sync_all()?;
        fs::set_permissions(&tmp_path, permissions)?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn normalizes_extensions() {
        assert_eq!(normalize_extension(".tsx"), "tsx");
        assert_eq!(normalize_extension(" tsx "), "tsx");
        assert_eq!(normalize_extension("jsx"), "jsx");
    }

    #[test]
    fn lists_only_matching_files_non_recursively() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.tsx"), "b")?;
        fs::write(dir.path().join("a.tsx"), "a")?;
        fs::write(dir.path().join("c.ts"), "c")?;
        fs::write(dir.path().join("d.TSX"), "d")?;
        fs::create_dir(dir.path().join("nested.tsx"))?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub").join("e.tsx"), "e")?;

        let files = list_page_files(dir.path(), ".tsx")?;
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["a.tsx", "b.tsx"]);
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = list_page_files(&dir.path().join("nope"), "tsx").unwrap_err();
        assert!(err.to_string().contains("Failed to read page directory"));
    }

    #[test]
    fn atomic_write_replaces_content_and_cleans_up() -> Result<()> {
        let dir = tempdir()?;
        let page = dir.path().join("Home.tsx");
        fs::write(&page, "old \u{1F525}")?;
        write_page_atomic(&page, "old ")?;
        assert_eq!(fs::read_to_string(&page)?, "old ");
        assert!(!tmp_path_for(&page).exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_keeps_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let page = dir.path().join("Locked.tsx");
        fs::write(&page, "\u{2B50}")?;
        fs::set_permissions(&page, fs::Permissions::from_mode(0o640))?;
        write_page_atomic(&page, "")?;
        assert_eq!(fs::metadata(&page)?.permissions().mode() & 0o777, 0o640);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_goes_through_symlinks() -> Result<()> {
        let dir = tempdir()?;
        let real = dir.path().join("Real.tsx");
        let link = dir.path().join("Link.tsx");
        fs::write(&real, "Hi \u{1F44B}")?;
        std::os::unix::fs::symlink(&real, &link)?;

        write_page_atomic(&link, "Hi ")?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real)?, "Hi ");
        assert_eq!(fs::read_to_string(&link)?, "Hi ");
        Ok(())
    }

    #[test]
    fn read_page_rejects_invalid_utf8() -> Result<()> {
        let dir = tempdir()?;
        let page = dir.path().join("Bad.tsx");
        fs::write(&page, [0x66, 0x6f, 0xff, 0xfe])?;
        assert!(read_page(&page).is_err());
        Ok(())
    }
}
