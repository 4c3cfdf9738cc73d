use std::path::{Path, PathBuf};

use bevy::prelude::Resource;

pub const QUESTIONS_VAR: &str = "KBC_QUESTIONS";
pub const ASSETS_VAR: &str = "KBC_ASSETS";
pub const FULLSCREEN_VAR: &str = "KBC_FULLSCREEN";

const DEFAULT_QUESTIONS: &str = "questions.txt";
const DEFAULT_ASSETS: &str = "assets";

/// Startup settings read from the environment (and `.env`, see `main`).
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub questions_path: PathBuf,
    pub assets_dir: PathBuf,
    pub fullscreen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions_path: DEFAULT_QUESTIONS.into(),
            assets_dir: DEFAULT_ASSETS.into(),
            fullscreen: false,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::from_lookup(&cwd, |key| std::env::var(key).ok())
    }

    /// `assets_dir` is always absolute, joined onto `base` when relative, so the presence
    /// check in [`Self::optional_asset`] and Bevy's asset reader agree on one root.
    pub fn from_lookup(base: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            questions_path: non_empty(QUESTIONS_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.questions_path),
            assets_dir: base.join(
                non_empty(ASSETS_VAR)
                    .map(PathBuf::from)
                    .unwrap_or(defaults.assets_dir),
            ),
            fullscreen: non_empty(FULLSCREEN_VAR)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.fullscreen),
        }
    }

    /// Asset path relative to the asset directory, if the file is actually there.
    pub fn optional_asset(&self, name: &str) -> Option<String> {
        self.assets_dir
            .join(name)
            .is_file()
            .then(|| name.to_string())
    }
}
