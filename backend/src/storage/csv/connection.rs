//! File-path management for the local CSV data directory.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Column order for the injections CSV file.
pub const INJECTION_HEADERS: [&str; 7] = ["date", "time", "dosage", "weight", "site", "notes", "user"];

/// Column order for the side-effects CSV file.
pub const SIDE_EFFECT_HEADERS: [&str; 3] = ["date", "notes", "user"];

/// CsvConnection manages file paths and ensures the data files exist.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new CSV connection in the default data directory.
    /// This uses ~/Documents/Injection Tracker unless INJECTION_TRACKER_DATA overrides it.
    pub fn new_default() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("INJECTION_TRACKER_DATA") {
            info!("Using data directory from INJECTION_TRACKER_DATA: {}", override_dir);
            return Self::new(override_dir);
        }

        let documents_dir = dirs::document_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine the Documents directory"))?;
        let data_dir = documents_dir.join("Injection Tracker");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path for the injections CSV.
    pub fn injections_file_path(&self) -> PathBuf {
        self.base_directory.join("injections.csv")
    }

    /// Get the file path for the side-effects CSV.
    pub fn side_effects_file_path(&self) -> PathBuf {
        self.base_directory.join("side_effects.csv")
    }

    /// Get the file path for the YAML configuration file.
    pub fn config_file_path(&self) -> PathBuf {
        self.base_directory.join("config.yaml")
    }

    /// Ensure the injections CSV exists with its header row.
    pub fn ensure_injections_file_exists(&self) -> std::io::Result<()> {
        let file_path = self.injections_file_path();
        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", INJECTION_HEADERS.join(",")))?;
        }
        Ok(())
    }

    /// Ensure the side-effects CSV exists with its header row.
    pub fn ensure_side_effects_file_exists(&self) -> std::io::Result<()> {
        let file_path = self.side_effects_file_path();
        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", SIDE_EFFECT_HEADERS.join(",")))?;
        }
        Ok(())
    }
}
