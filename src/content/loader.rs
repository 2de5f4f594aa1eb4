//! Loader for the movement tuning (RON) and clip table (JSON) at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::animation::ClipTable;
use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse movement tuning from RON text and validate every field.
pub fn parse_tuning(file: &str, contents: &str) -> Result<MovementTuning, ContentLoadError> {
    let tuning: MovementTuning = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    let errors = tuning.validate();
    if !errors.is_empty() {
        return Err(validation_error(file, &errors));
    }

    Ok(tuning)
}

/// Parse the clip table from JSON text and reject unplayable clips.
pub fn parse_clip_table(file: &str, contents: &str) -> Result<ClipTable, ContentLoadError> {
    let table: ClipTable = serde_json::from_str(contents).map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })?;

    let errors = table.validate();
    if !errors.is_empty() {
        return Err(validation_error(file, &errors));
    }

    Ok(table)
}

fn validation_error<E: std::fmt::Display>(file: &str, errors: &[E]) -> ContentLoadError {
    let message = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    ContentLoadError {
        file: file.to_string(),
        message: format!("Validation error: {}", message),
    }
}

pub fn load_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let contents = read_file(path)?;
    parse_tuning(&path.display().to_string(), &contents)
}

pub fn load_clip_table(path: &Path) -> Result<ClipTable, ContentLoadError> {
    let contents = read_file(path)?;
    parse_clip_table(&path.display().to_string(), &contents)
}
