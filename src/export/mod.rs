//! Saving accepted reports as documents the caregiver can download.

use crate::errors::Error;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes report text to a document and returns where it landed.
pub trait DocumentExporter: Send + Sync {
    fn save(&self, content: &str) -> Result<PathBuf, Error>;
}

/// Stores reports as timestamped Markdown files in one directory
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        MarkdownExporter { dir: dir.into() }
    }

    /// Saves `content` under a name derived from `now`.
    ///
    /// An existing file is never overwritten; a numeric suffix is added instead.
    pub fn save_at(&self, content: &str, now: DateTime<Local>) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir)?;

        let stem = format!("verslag_{}", now.format("%Y-%m-%d_%H-%M"));
        let mut path = self.dir.join(format!("{}.md", stem));
        let mut n = 1;
        let mut file = loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    n += 1;
                    path = self.dir.join(format!("{}-{}.md", stem, n));
                }
                Err(e) => return Err(e.into()),
            }
        };

        file.write_all(content.trim_end().as_bytes())?;
        file.write_all(b"\n")?;

        info!("Document saved as: {}", path.display());
        Ok(path)
    }
}

impl DocumentExporter for MarkdownExporter {
    fn save(&self, content: &str) -> Result<PathBuf, Error> {
        self.save_at(content, Local::now())
    }
}

/// Resolves a download request to a file inside `dir`.
///
/// Only bare file names are accepted; anything that could leave the directory is refused.
pub fn resolve_download(dir: &Path, filename: &str) -> Result<PathBuf, Error> {
    let bare = !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\'])
        && Path::new(filename).file_name().map(|n| n == filename).unwrap_or(false);
    if !bare {
        return Err(Error::InvalidFilename(filename.to_string()));
    }
    Ok(dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 3, 14, 5, 0).unwrap()
    }

    #[test]
    fn saves_timestamped_file_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = MarkdownExporter::new(tmp.path().join("documents"));
        let path = exporter.save_at("# Verslag\nPietje was er.", fixed_time()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "verslag_2024-10-03_14-05.md"
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Verslag\nPietje was er.\n"
        );
    }

    #[test]
    fn same_minute_does_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = MarkdownExporter::new(tmp.path());
        let first = exporter.save_at("een", fixed_time()).unwrap();
        let second = exporter.save_at("twee", fixed_time()).unwrap();
        assert_ne!(first, second);
        assert!(second.to_str().unwrap().ends_with("verslag_2024-10-03_14-05-2.md"));
        assert_eq!(fs::read_to_string(first).unwrap(), "een\n");
    }

    #[test]
    fn concurrent_saves_in_same_minute_get_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = std::sync::Arc::new(MarkdownExporter::new(tmp.path()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let exporter = exporter.clone();
                std::thread::spawn(move || {
                    exporter.save_at(&format!("versie {}", i), fixed_time()).unwrap()
                })
            })
            .collect();
        let mut paths: Vec<PathBuf> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 8);

        let mut contents: Vec<String> = paths
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        contents.sort();
        let mut expected: Vec<String> = (0..8).map(|i| format!("versie {}\n", i)).collect();
        expected.sort();
        assert_eq!(contents, expected);
    }

    #[test]
    fn download_accepts_bare_names_only() {
        let dir = Path::new("/srv/documents");
        assert_eq!(
            resolve_download(dir, "verslag_2024-10-03_14-05.md").unwrap(),
            dir.join("verslag_2024-10-03_14-05.md")
        );
        for bad in ["", "..", "../secret", "a/b.md", "a\\b.md", ".env"] {
            assert!(
                matches!(resolve_download(dir, bad), Err(Error::InvalidFilename(_))),
                "accepted {bad:?}"
            );
        }
    }
}
