use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::composition::cue::OverlayStyle;
use crate::composition::layers::{AUDIO_CHANNEL, BAND_WIDTH, SENTENCE_BASE_CHANNEL, WORD_BASE_CHANNEL};
use crate::sink::default_editor_path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Transcription service config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// External editor config
    #[serde(default)]
    pub editor: EditorConfig,

    /// Overlay style applied to every cue
    #[serde(default)]
    pub style: OverlayStyle,

    /// Channel band layout
    #[serde(default)]
    pub channels: ChannelConfig,

    /// Folder scanned for source videos
    #[serde(default = "default_source_folder")]
    pub source_folder: PathBuf,

    /// Folder receiving transcripts, projects and renders
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcription service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    // @field: Service URL
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    // @field: Upload timeout seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_transcription_endpoint(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// External editor configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    // @field: Editor executable path
    #[serde(default = "default_editor_executable")]
    pub executable: PathBuf,

    // @field: Driver script run inside the editor
    #[serde(default = "default_driver_script")]
    pub driver_script: PathBuf,

    // @field: Timeout for building a project
    #[serde(default = "default_apply_timeout_secs")]
    pub apply_timeout_secs: u64,

    // @field: Timeout for rendering a project
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            executable: default_editor_executable(),
            driver_script: default_driver_script(),
            apply_timeout_secs: default_apply_timeout_secs(),
            render_timeout_secs: default_render_timeout_secs(),
        }
    }
}

/// Channel band layout for overlay cues
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Base channel of the sentence band
    #[serde(default = "default_sentence_base")]
    pub sentence_base: u32,

    /// Base channel of the word band
    #[serde(default = "default_word_base")]
    pub word_base: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            sentence_base: default_sentence_base(),
            word_base: default_word_base(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_transcription_endpoint() -> String {
    "http://localhost:8000/transcribe/".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    600
}

fn default_editor_executable() -> PathBuf {
    default_editor_path()
}

fn default_driver_script() -> PathBuf {
    PathBuf::from("scripts/overlay_driver.py")
}

fn default_apply_timeout_secs() -> u64 {
    300
}

fn default_render_timeout_secs() -> u64 {
    3600
}

fn default_sentence_base() -> u32 {
    SENTENCE_BASE_CHANNEL
}

fn default_word_base() -> u32 {
    WORD_BASE_CHANNEL
}

fn default_source_folder() -> PathBuf {
    PathBuf::from("videos")
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcription: TranscriptionConfig::default(),
            editor: EditorConfig::default(),
            style: OverlayStyle::default(),
            channels: ChannelConfig::default(),
            source_folder: default_source_folder(),
            output_folder: default_output_folder(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.transcription.endpoint)
            .map_err(|e| anyhow!("Invalid transcription endpoint URL '{}': {}", self.transcription.endpoint, e))?;

        if self.transcription.timeout_secs == 0 {
            return Err(anyhow!("Transcription timeout must be at least 1 second"));
        }

        if self.style.fade_frames == 0 {
            return Err(anyhow!("Fade length must be at least 1 frame"));
        }

        if self.style.font_size == 0 || self.style.line_height == 0 {
            return Err(anyhow!("Font size and line height must be positive"));
        }

        if !(0.0..=1.0).contains(&self.style.background_alpha) {
            return Err(anyhow!(
                "Background alpha must be within [0, 1], got {}",
                self.style.background_alpha
            ));
        }

        let lo = self.channels.sentence_base.min(self.channels.word_base);
        let hi = self.channels.sentence_base.max(self.channels.word_base);
        if lo <= AUDIO_CHANNEL {
            return Err(anyhow!(
                "Overlay bands must sit above the audio channel {}",
                AUDIO_CHANNEL
            ));
        }
        if hi - lo < BAND_WIDTH {
            return Err(anyhow!(
                "Sentence and word bands overlap: bases {} and {} need at least {} channels between them",
                self.channels.sentence_base,
                self.channels.word_base,
                BAND_WIDTH
            ));
        }

        Ok(())
    }
}
