//! ZIP archive extraction.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use zip::ZipArchive;

use super::{Extractor, FsMethod};

/// Extracts ZIP archives with the `zip` crate
#[derive(Debug, Clone, Default)]
pub struct ZipExtractor {
    fs_method: FsMethod,
}

impl ZipExtractor {
    pub fn new(fs_method: FsMethod) -> Self {
        Self { fs_method }
    }
}

impl Extractor for ZipExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let file = File::open(archive)
            .with_context(|| format!("Failed to open archive {}", archive.display()))?;
        let mut zip = ZipArchive::new(file)
            .with_context(|| format!("Failed to read zip {}", archive.display()))?;

        fs::create_dir_all(destination)
            .with_context(|| format!("Failed to create directory: {}", destination.display()))?;

        debug!(
            archive = %archive.display(),
            destination = %destination.display(),
            entries = zip.len(),
            method = %self.fs_method,
            "Extracting"
        );

        match self.fs_method {
            FsMethod::Direct => zip.extract(destination).with_context(|| {
                format!("Failed to extract {} to {}", archive.display(), destination.display())
            }),
            FsMethod::Staged => {
                let staging = tempfile::Builder::new()
                    .prefix(".plotseed-extract-")
                    .tempdir_in(destination)
                    .with_context(|| {
                        format!("Failed to create staging dir in {}", destination.display())
                    })?;

                zip.extract(staging.path()).with_context(|| {
                    format!(
                        "Failed to extract {} to {}",
                        archive.display(),
                        staging.path().display()
                    )
                })?;

                for entry in fs::read_dir(staging.path())? {
                    let entry = entry?;
                    let target = destination.join(entry.file_name());
                    if target.is_dir() {
                        fs::remove_dir_all(&target)?;
                    } else if target.exists() {
                        fs::remove_file(&target)?;
                    }
                    fs::rename(entry.path(), &target).with_context(|| {
                        format!("Failed to move extracted entry to {}", target.display())
                    })?;
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, body) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_direct_and_staged() {
        for method in [FsMethod::Direct, FsMethod::Staged] {
            let temp = TempDir::new().unwrap();
            let archive = temp.path().join("master.zip");
            write_zip(&archive, &[("repo-master/plot/a.md", "title = A\n+++\nbody")]);

            let dest = temp.path().join("uploads");
            ZipExtractor::new(method).extract(&archive, &dest).unwrap();

            let extracted = dest.join("repo-master/plot/a.md");
            assert_eq!(fs::read_to_string(extracted).unwrap(), "title = A\n+++\nbody");
            // Only the archive root remains in the destination
            assert_eq!(fs::read_dir(&dest).unwrap().count(), 1, "method: {method}");
        }
    }

    #[test]
    fn test_staged_replaces_existing_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("master.zip");
        write_zip(&archive, &[("repo-master/new.md", "new")]);

        let dest = temp.path().join("uploads");
        fs::create_dir_all(dest.join("repo-master")).unwrap();
        fs::write(dest.join("repo-master/stale.md"), "stale").unwrap();

        ZipExtractor::new(FsMethod::Staged).extract(&archive, &dest).unwrap();

        assert!(dest.join("repo-master/new.md").exists());
        assert!(!dest.join("repo-master/stale.md").exists());
    }

    #[test]
    fn test_extract_missing_archive_names_path() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("missing.zip");

        let err = ZipExtractor::default()
            .extract(&archive, &temp.path().join("out"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.zip"));
    }

    #[test]
    fn test_extract_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, "definitely not a zip").unwrap();

        let result = ZipExtractor::default().extract(&archive, &temp.path().join("out"));
        assert!(result.is_err());
    }
}
