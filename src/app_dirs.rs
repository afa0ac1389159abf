use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn high_score_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "abece")
            .map(|proj_dirs| proj_dirs.data_local_dir().join("recorde.txt"))
    }

    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "abece")
            .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
    }
}
