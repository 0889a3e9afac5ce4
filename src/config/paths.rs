//! Canonical paths under the plotseed home directory.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! | Path | Purpose |
//! |------|---------|
//! | `<home>/catalog.json` | Stored files and their metadata |
//! | `<home>/library/` | Downloaded archives, registered images |
//! | `<home>/uploads/` | Default extraction directory |

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Catalog file ($PLOTSEED_HOME/catalog.json)
pub fn catalog_path(home: &Path) -> PathBuf {
    home.join("catalog.json")
}

/// Library directory ($PLOTSEED_HOME/library)
pub fn library_dir(home: &Path) -> PathBuf {
    home.join("library")
}

/// Extraction directory when none is configured ($PLOTSEED_HOME/uploads)
pub fn default_uploads_dir(home: &Path) -> PathBuf {
    home.join("uploads")
}

/// Where the archive's top-level directory ends up after extraction
pub fn extracted_dir() -> Result<PathBuf> {
    let config = crate::config::config()?;
    Ok(config.uploads.join(&config.extract_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_under_home() {
        let home = PathBuf::from("/srv/plotseed");

        assert_eq!(catalog_path(&home), PathBuf::from("/srv/plotseed/catalog.json"));
        assert_eq!(library_dir(&home), PathBuf::from("/srv/plotseed/library"));
        assert_eq!(default_uploads_dir(&home), PathBuf::from("/srv/plotseed/uploads"));
    }
}
