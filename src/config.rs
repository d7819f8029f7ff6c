use std::path::Path;

use crate::constants::{
    AREA_THRESHOLD, KOMI, MAX_SIZE, MAX_STEPS, MIN_SIZE, N, UNDO_BUDGET, area_threshold_for,
};
use crate::error::ConfigError;

/// Rule parameters for a game, loadable from TOML.
///
/// Fields missing from a rules file take their defaults. The area threshold
/// is derived from the final board size unless it is given explicitly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RulesFile")]
pub struct Config {
    /// Side of the playable board.
    pub size: usize,
    /// Capacity of the history stack.
    pub max_steps: usize,
    /// Undo requests granted to each color.
    pub undo_budget: u32,
    /// Stones required before empty regions are attributed in the area count.
    pub area_threshold: usize,
    /// Compensation subtracted from Black's area.
    pub komi: f32,
}

/// Contents of a rules file before defaults are filled in.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct RulesFile {
    pub size: Option<usize>,
    pub max_steps: Option<usize>,
    pub undo_budget: Option<u32>,
    pub area_threshold: Option<usize>,
    pub komi: Option<f32>,
}

impl RulesFile {
    /// Read a rules file without validating it.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl From<RulesFile> for Config {
    fn from(file: RulesFile) -> Self {
        let base = Config::for_size(file.size.unwrap_or(N));
        Config {
            max_steps: file.max_steps.unwrap_or(base.max_steps),
            undo_budget: file.undo_budget.unwrap_or(base.undo_budget),
            area_threshold: file.area_threshold.unwrap_or(base.area_threshold),
            komi: file.komi.unwrap_or(base.komi),
            ..base
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: N,
            max_steps: MAX_STEPS,
            undo_budget: UNDO_BUDGET,
            area_threshold: AREA_THRESHOLD,
            komi: KOMI,
        }
    }
}

impl Config {
    /// Defaults for a board of the given size, with the area threshold scaled
    /// to half its points.
    pub fn for_size(size: usize) -> Self {
        Config {
            size,
            area_threshold: area_threshold_for(size),
            ..Config::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::from(RulesFile::read(path)?);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::Validation(format!(
                "size must be in {MIN_SIZE}..={MAX_SIZE} (got {})",
                self.size
            )));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Validation("max_steps must be > 0".into()));
        }
        if self.area_threshold > self.size * self.size {
            return Err(ConfigError::Validation(format!(
                "area_threshold must be <= {} for a {}x{} board",
                self.size * self.size,
                self.size,
                self.size
            )));
        }
        if !self.komi.is_finite() {
            return Err(ConfigError::Validation("komi must be finite".into()));
        }
        Ok(())
    }
}
