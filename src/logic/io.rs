// Input/output logic.
use std::{fs, path::{Path, PathBuf}};

use crate::logic::error::ConfigError;

// Read a text file and return it as a string.
pub fn read_text_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

// Get the path of the database file in a directory, creating the directory if needed.
pub fn database_file(dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let canonised = dunce::canonicalize(dir)?;
    return Ok(canonised.join("roster.db"));
}
