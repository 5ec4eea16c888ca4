use crate::transcription::PollConfig;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub transcription: TranscriptionConfig,
    pub summary: SummaryConfig,
    pub journal: JournalConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    pub base_url: String,

    /// Credential for the STT service. Never ships as a literal; supply it
    /// via ECHOMIND_TRANSCRIPTION__API_KEY or the config file.
    #[serde(default)]
    pub api_key: String,

    pub poll_interval_secs: u64,
    pub max_poll_attempts: u32,

    /// Optional wall-clock budget for the polling loop, in seconds.
    #[serde(default)]
    pub overall_timeout_secs: Option<u64>,
}

impl TranscriptionConfig {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.max_poll_attempts,
            overall_timeout: self.overall_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryConfig {
    pub base_url: String,

    /// Credential for the summarization service (ECHOMIND_SUMMARY__API_KEY).
    #[serde(default)]
    pub api_key: String,

    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct JournalConfig {
    pub entries_path: String,
}

impl JournalConfig {
    /// Journal file path with `~` expanded.
    pub fn expanded_entries_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.entries_path).into_owned())
    }
}

impl Config {
    /// Load configuration: built-in defaults, then an optional TOML file,
    /// then ECHOMIND_* environment overrides (section and key separated by
    /// `__`, e.g. ECHOMIND_TRANSCRIPTION__API_KEY).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "echomind")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8787)?
            .set_default("transcription.base_url", "https://api.assemblyai.com/v2")?
            .set_default("transcription.poll_interval_secs", 3)?
            .set_default("transcription.max_poll_attempts", 40)?
            .set_default("summary.base_url", "https://api.openai.com/v1")?
            .set_default("summary.model", "gpt-4o-mini")?
            .set_default("summary.max_tokens", 512)?
            .set_default("summary.temperature", 0.8)?
            .set_default("journal.entries_path", "~/.local/share/echomind/journal.json")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("ECHOMIND").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
