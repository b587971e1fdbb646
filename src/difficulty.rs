use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PresetError;

const APP_DIR_NAME: &str = "smooth-snake";
const PRESET_FILE_NAME: &str = "presets.json";

/// Tick interval and easing coefficients selected once per game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub key: String,
    pub label: String,
    pub tick_interval_ms: u64,
    /// Head easing while moving straight.
    pub movement_ease: f32,
    /// Head easing while turning.
    pub turn_ease: f32,
    /// Easing of the last segment; the body blends toward it.
    pub tail_ease: f32,
}

impl DifficultyPreset {
    fn builtin(
        key: &str,
        label: &str,
        tick_interval_ms: u64,
        movement_ease: f32,
        turn_ease: f32,
        tail_ease: f32,
    ) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            tick_interval_ms,
            movement_ease,
            turn_ease,
            tail_ease,
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> Result<(), PresetError> {
        let invalid = |reason: String| PresetError::Invalid {
            key: self.key.clone(),
            reason,
        };

        if self.key.trim().is_empty() {
            return Err(invalid("key must not be empty".to_owned()));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be positive".to_owned()));
        }

        for (name, value) in [
            ("movement_ease", self.movement_ease),
            ("turn_ease", self.turn_ease),
            ("tail_ease", self.tail_ease),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(format!("{name} must be in (0, 1], got {value}")));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PresetFile {
    presets: Vec<DifficultyPreset>,
}

/// Ordered, validated set of difficulty presets.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    presets: Vec<DifficultyPreset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetTable {
    /// The four presets shipped with the game, slowest first.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                DifficultyPreset::builtin("easy", "Easy", 600, 0.15, 0.25, 0.2),
                DifficultyPreset::builtin("medium", "Medium", 300, 0.2, 0.3, 0.25),
                DifficultyPreset::builtin("hard", "Hard", 200, 0.25, 0.35, 0.3),
                DifficultyPreset::builtin("expert", "Expert", 100, 0.3, 0.4, 0.35),
            ],
        }
    }

    /// Builds a table from explicit presets, rejecting invalid entries.
    pub fn new(presets: Vec<DifficultyPreset>) -> Result<Self, PresetError> {
        if presets.is_empty() {
            return Err(PresetError::Empty);
        }

        let mut seen = HashSet::new();
        for preset in &presets {
            preset.validate()?;
            if !seen.insert(preset.key.to_ascii_lowercase()) {
                return Err(PresetError::DuplicateKey(preset.key.clone()));
            }
        }

        Ok(Self { presets })
    }

    /// Parses a JSON preset table.
    pub fn from_json(raw: &str, path: &Path) -> Result<Self, PresetError> {
        let file: PresetFile =
            serde_json::from_str(raw).map_err(|source| PresetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(file.presets)
    }

    /// Loads the table from an explicit file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let raw = fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&raw, path)?;
        info!(path = %path.display(), presets = table.len(), "loaded difficulty presets");
        Ok(table)
    }

    /// Loads the user's preset file when present, otherwise the built-ins.
    ///
    /// Returns `Err` when the file exists but cannot be read or parsed, so the
    /// caller can surface a warning before entering raw terminal mode.
    pub fn load_user_or_builtin() -> Result<Self, PresetError> {
        Self::load_or_builtin(&presets_path())
    }

    fn load_or_builtin(path: &Path) -> Result<Self, PresetError> {
        match Self::load(path) {
            Err(PresetError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preset file, using built-in presets");
                Ok(Self::builtin())
            }
            other => other,
        }
    }

    /// Looks a preset up by key, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DifficultyPreset> {
        self.presets
            .iter()
            .find(|preset| preset.key.eq_ignore_ascii_case(key))
    }

    /// Iterates over presets in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &DifficultyPreset> {
        self.presets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Returns the platform-correct preset override path.
#[must_use]
pub fn presets_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(PRESET_FILE_NAME);
    base
}
