use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root: the directory holding the executable.
    pub fn root_dir() -> PathBuf {
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Main data directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Default location for exported history files (./data/exports).
    pub fn exports_dir() -> PathBuf {
        Self::data_dir().join("exports")
    }

    /// Creates `dir` (and parents) if it does not exist yet.
    pub fn ensure_dir(dir: &Path) -> Result<(), std::io::Error> {
        if !dir.exists() {
            info!("Creating directory: {:?}", dir);
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
