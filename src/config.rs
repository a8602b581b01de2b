use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub knowledge: KnowledgeConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
    pub server: ServerConfig,
}

/// Paths of the three knowledge files plus the segmentation bound.
#[derive(Debug, Deserialize, Clone)]
pub struct KnowledgeConfig {
    pub articles: PathBuf,
    pub situations: PathBuf,
    pub contracts: PathBuf,
    #[serde(default = "default_max_block_chars")]
    pub max_block_chars: usize,
}

fn default_max_block_chars() -> usize {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible chat-completions base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for question answering.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Model used for document and video summaries.
    #[serde(default = "default_summary_model")]
    pub summary_model: String,
    /// Sampling temperature for summary requests. Answer requests use
    /// the provider default.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_chat_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_summary_model() -> String {
    "openai/gpt-oss-120b".to_string()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptConfig {
    /// Transcript languages, tried in order.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["pt-BR".to_string(), "pt".to_string(), "en".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.knowledge.max_block_chars == 0 {
        anyhow::bail!("knowledge.max_block_chars must be > 0");
    }

    if config.llm.base_url.is_empty() {
        anyhow::bail!("llm.base_url must not be empty");
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        anyhow::bail!("llm.temperature must be in [0.0, 2.0]");
    }

    if config.transcript.languages.is_empty() {
        anyhow::bail!("transcript.languages must list at least one language");
    }

    Ok(config)
}
