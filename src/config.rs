use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Model and credential configuration. One field per model role so a
/// deployment can swap any of them independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub report_model: String,
    pub chat_model: String,
    pub analysis_model: String,
    pub enhance_model: String,
    pub image_model: String,
    pub tts_model: String,
    pub tts_voice: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            report_model: "gemini-3-flash-preview".to_string(),
            chat_model: "gemini-3-flash-preview".to_string(),
            analysis_model: "gemini-3-flash-preview".to_string(),
            enhance_model: "gemini-flash-lite-latest".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            tts_voice: "Kore".to_string(),
        }
    }
}

impl AppConfig {
    /// Platform config directory for this app, when one exists.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("market-intel"))
    }

    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");
        let mut config = if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Self::default(),
            }
        } else {
            let c = Self::default();
            c.save(config_dir);
            c
        };

        // Environment variable wins over the file, when set
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini_api_key = key;
            }
        }

        config
    }

    pub fn save(&self, config_dir: &Path) {
        std::fs::create_dir_all(config_dir).ok();
        let config_path = config_dir.join("config.json");
        if let Ok(content) = serde_json::to_string_pretty(self) {
            std::fs::write(config_path, content).ok();
        }
    }
}
