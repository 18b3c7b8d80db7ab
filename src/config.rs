use crate::error::{QuizError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_MODELS: [&str; 4] = ["gpt-4o", "gpt-4", "llama-3", "mistral"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API key, used only for the metadata fallback.
    pub youtube_api_key: Option<String>,
    /// Bearer key for the chat completion endpoint.
    pub llm_api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub llm_base_url: String,
    /// Candidate models, tried in order.
    pub models: Vec<String>,
    pub temperature: f32,
    /// LibreTranslate-compatible endpoint.
    pub translate_url: String,
    pub translate_api_key: Option<String>,
    /// Translate non-English transcripts to English.
    pub translate: bool,
    /// Maximum characters per translation request.
    pub chunk_size: usize,
    /// Caption languages to prefer, in order.
    pub preferred_languages: Vec<String>,
    pub youtube_base_url: String,
    pub youtube_data_url: String,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            llm_api_key: None,
            llm_base_url: "https://api.openai.com/v1".to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            temperature: 0.3,
            translate_url: "https://libretranslate.de/translate".to_string(),
            translate_api_key: None,
            translate: true,
            chunk_size: crate::translate::DEFAULT_CHUNK_SIZE,
            preferred_languages: Vec::new(),
            youtube_base_url: "https://www.youtube.com".to_string(),
            youtube_data_url: "https://www.googleapis.com/youtube/v3".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        toml::from_str::<Config>(&contents)
            .map_err(|e| QuizError::Config(format!("{}: {}", path.display(), e)))
    }

    fn apply_env(&mut self) {
        self.apply_env_with(env);
    }

    /// Apply overrides from `lookup`, which must already drop blank values.
    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("YOUTUBE_API_KEY") {
            self.youtube_api_key = Some(key);
        }
        if let Some(key) = lookup("LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.llm_api_key = Some(key);
        }
        if let Some(url) = lookup("LLM_BASE_URL") {
            self.llm_base_url = url;
        }
        if let Some(models) = lookup("VIDQUIZ_MODELS") {
            self.models = split_list(&models);
        }
        if let Some(url) = lookup("TRANSLATE_URL") {
            self.translate_url = url;
        }
        if let Some(key) = lookup("TRANSLATE_API_KEY") {
            self.translate_api_key = Some(key);
        }
        if let Some(flag) = lookup("VIDQUIZ_TRANSLATE") {
            match parse_flag(&flag) {
                Some(b) => self.translate = b,
                None => warn!(
                    "Ignoring VIDQUIZ_TRANSLATE={:?}, expected true/false, 1/0, yes/no or on/off",
                    flag
                ),
            }
        }
        if let Some(langs) = lookup("VIDQUIZ_PREFERRED_LANGUAGES") {
            self.preferred_languages = split_list(&langs);
        }
        if let Some(host) = lookup("VIDQUIZ_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("VIDQUIZ_PORT") {
            match port.parse() {
                Ok(p) => self.port = p,
                Err(_) => warn!("Ignoring VIDQUIZ_PORT={:?}, not a port number", port),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(QuizError::Config(
                "At least one model must be configured (VIDQUIZ_MODELS)".to_string(),
            ));
        }

        if self.chunk_size == 0 {
            return Err(QuizError::Config(
                "Chunk size must be greater than 0".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(QuizError::Config("Port must be greater than 0".to_string()));
        }

        if self.youtube_api_key.is_none() {
            warn!("YOUTUBE_API_KEY not set, metadata fallback will be unavailable");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vidquiz").join("config.toml"))
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
