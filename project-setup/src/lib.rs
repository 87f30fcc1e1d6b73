//! Working-environment layout for the canopy gap workflow.
//!
//! ```text
//! <base>/data/raw_data/{DOPs,laz_ALS,laz_DAP,dtm_tiles,test_tiles}
//! <base>/data/processed_data/{DOPs,nDSMs_ALS,nDSMs_DAP,laz_ALS,laz_DAP,datasets,models,gap_polygons_ALS,gap_polygons_DAP}
//! <base>/data/metadata
//! <base>/{src,scripts,output}
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

pub const RAW_DATA_DIR: &str = "data/raw_data";
pub const PROCESSED_DATA_DIR: &str = "data/processed_data";
pub const OUTPUT_DIR: &str = "output";

/// Data tree, relative to the base directory.
pub const DATA_DIRECTORIES: [&str; 15] = [
    "data/raw_data/DOPs",
    "data/raw_data/laz_ALS",
    "data/raw_data/laz_DAP",
    "data/raw_data/dtm_tiles",
    "data/raw_data/test_tiles",
    "data/processed_data/DOPs",
    "data/processed_data/nDSMs_ALS",
    "data/processed_data/nDSMs_DAP",
    "data/processed_data/laz_ALS",
    "data/processed_data/laz_DAP",
    "data/processed_data/datasets",
    "data/processed_data/models",
    "data/processed_data/gap_polygons_ALS",
    "data/processed_data/gap_polygons_DAP",
    "data/metadata",
];

/// Siblings of `data/`.
pub const OTHER_DIRECTORIES: [&str; 3] = ["src", "scripts", OUTPUT_DIR];

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine current directory")]
    CurrentDir(#[source] io::Error),
}

/// Path handles handed to the processing scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub raw_data_dir: PathBuf,
    pub processed_data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    pub fn under(base_dir: &Path) -> Self {
        ProjectPaths {
            raw_data_dir: base_dir.join(RAW_DATA_DIR),
            processed_data_dir: base_dir.join(PROCESSED_DATA_DIR),
            output_dir: base_dir.join(OUTPUT_DIR),
        }
    }
}

/// Parent of the current working directory, or the working directory itself
/// when it has no parent.
pub fn default_base_dir() -> Result<PathBuf, SetupError> {
    let cwd = std::env::current_dir().map_err(SetupError::CurrentDir)?;
    Ok(cwd.parent().map(Path::to_path_buf).unwrap_or(cwd))
}

/// Creates every directory of the layout below `base_dir`. Existing
/// directories are left alone, so repeated calls are harmless.
pub fn make_folders(base_dir: &Path) -> Result<ProjectPaths, SetupError> {
    for rel in DATA_DIRECTORIES.iter().chain(OTHER_DIRECTORIES.iter()) {
        let dir = base_dir.join(rel);
        if dir.is_dir() {
            debug!("directory {} already exists", rel);
            continue;
        }
        fs::create_dir_all(&dir).map_err(|source| SetupError::CreateDir { path: dir.clone(), source })?;
        info!("created directory {}", rel);
    }

    Ok(ProjectPaths::under(base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_handles_point_into_layout() {
        let p = ProjectPaths::under(Path::new("/srv/gaps"));
        assert_eq!(p.raw_data_dir, PathBuf::from("/srv/gaps/data/raw_data"));
        assert_eq!(p.processed_data_dir, PathBuf::from("/srv/gaps/data/processed_data"));
        assert_eq!(p.output_dir, PathBuf::from("/srv/gaps/output"));
    }

    #[test]
    fn every_data_dir_sits_under_data() {
        assert!(DATA_DIRECTORIES.iter().all(|d| d.starts_with("data/")));
        assert!(DATA_DIRECTORIES.iter().any(|d| d.starts_with(RAW_DATA_DIR)));
        assert!(DATA_DIRECTORIES.iter().any(|d| d.starts_with(PROCESSED_DATA_DIR)));
    }
}
