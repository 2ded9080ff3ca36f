// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor settings and rail document files.
//!
//! Settings live in a RON file next to the project; every field has a
//! default so partial files load. Rail documents are the JSON export
//! records produced by `camrail_rail`.

use crate::error::{EditorError, Result};
use crate::state::EditorState;
use camrail_rail::{PlaybackController, RailDocument};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "camrail.ron";

/// Tunable editor behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Radians of rotation per normalized viewport unit of pointer travel
    pub rotation_sensitivity: f32,
    /// Radius of a point's body handle
    pub handle_radius: f32,
    /// Length of a point's direction indicator
    pub indicator_length: f32,
    /// Pick radius of a point's direction indicator
    pub indicator_radius: f32,
    /// Path line samples per rail segment
    pub path_samples_per_segment: usize,
    /// Seconds to play the whole rail
    pub playback_duration: f32,
    /// Loop playback
    pub playback_looping: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 2.0,
            handle_radius: 0.25,
            indicator_length: 0.8,
            indicator_radius: 0.12,
            path_samples_per_segment: 16,
            playback_duration: camrail_rail::playback::DEFAULT_DURATION,
            playback_looping: false,
        }
    }
}

impl EditorSettings {
    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save settings
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!("Saved editor settings to {:?}", path);
        Ok(())
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Deserialize from RON
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Playback controller configured from these settings
    pub fn playback_controller(&self) -> PlaybackController {
        PlaybackController::new(self.playback_duration).with_looping(self.playback_looping)
    }
}

impl EditorState {
    /// Save the rail to the current document path
    pub fn save_document(&mut self) -> Result<PathBuf> {
        let path = self.document_path.clone().ok_or(EditorError::NoDocumentPath)?;
        self.save_document_to_path(&path)?;
        Ok(path)
    }

    /// Save the rail to a specific path
    pub fn save_document_to_path(&mut self, path: &Path) -> Result<()> {
        self.to_document().save(path)?;
        self.document_path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Load a rail document, replacing the current rail
    pub fn open_document(&mut self, path: &Path) -> Result<()> {
        let document = RailDocument::load(path)?;
        self.load_document(&document);
        self.document_path = Some(path.to_path_buf());
        Ok(())
    }
}
