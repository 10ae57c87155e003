use std::path::{Path, PathBuf};

use reqview_viewer::ViewerConfig;
use serde::{Deserialize, Serialize};

use crate::theme::ThemeConfig;

pub const CONFIG_DIR: &str = "reqview";
pub const CONFIG_FILENAME: &str = "gui.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuiConfig {
    pub database: Option<PathBuf>,
    pub viewer: ViewerConfig,
    pub theme: ThemeConfig,
}

pub fn gui_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// A missing file yields the defaults.
pub fn load_gui_config(path: &Path) -> Result<GuiConfig, String> {
    if !path.exists() {
        return Ok(GuiConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
    toml::from_str(&contents).map_err(|err| err.to_string())
}

pub async fn save_gui_config(path: PathBuf, config: GuiConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    let raw = toml::to_string_pretty(&config).map_err(|err| err.to_string())?;
    std::fs::write(path, raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_gui_config(&dir.path().join("gui.toml")).unwrap();
        assert_eq!(config, GuiConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gui.toml");
        std::fs::write(
            &path,
            "database = \"/tmp/capture.db\"\n\n[viewer]\nrequest_editable = true\n",
        )
        .unwrap();
        let config = load_gui_config(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/capture.db")));
        assert!(config.viewer.request_editable);
        assert!(config.viewer.enable_compare_button);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn invalid_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gui.toml");
        std::fs::write(&path, "viewer = 3").unwrap();
        assert!(load_gui_config(&path).is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gui.toml");
        let mut config = GuiConfig::default();
        config.viewer.widget_name = "probe".to_string();
        block_on(save_gui_config(path.clone(), config.clone())).unwrap();
        assert_eq!(load_gui_config(&path).unwrap(), config);
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }
}
