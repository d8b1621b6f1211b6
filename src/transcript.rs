use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};

// @module: Transcript data model and JSON persistence

/// Which transcript sequence a span belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Sentence-level span
    Sentence,
    /// Word-level span
    Word,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpanKind::Sentence => write!(f, "sentence"),
            SpanKind::Word => write!(f, "word"),
        }
    }
}

// @struct: Single timed text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    // @field: Span text
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,
}

impl Span {
    /// Creates a new span - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Span {
            text: text.into(),
            start,
            end,
        }
    }

    // @creates: Validated span
    // @validates: Finite times, time range and non-empty text
    pub fn validate(&self) -> Result<(), crate::errors::SpanError> {
        use crate::errors::SpanError;

        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SpanError::NonFiniteTime(self.text.clone()));
        }

        if self.end <= self.start {
            return Err(SpanError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }

        if self.text.trim().is_empty() {
            return Err(SpanError::EmptyText);
        }

        Ok(())
    }

    /// Duration of the span in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of whitespace-separated tokens in the span text
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.2}s --> {:.2}s] {}", self.start, self.end, self.text)
    }
}

/// Canvas declaration carried by the transcript: output dimensions and frame rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CanvasDecl {
    /// Named resolution, when the producer labeled it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Canvas width in pixels
    #[serde(default)]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default)]
    pub height: u32,

    /// Raw frame rate; may be fractional (e.g. 29.97)
    #[serde(default)]
    pub fps: f64,
}

/// Full transcript: declared canvas plus ordered sentence and word sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Declared canvas for the whole timeline
    #[serde(default)]
    pub resolution: CanvasDecl,

    /// Ordered sentence spans
    #[serde(default)]
    pub sentences: Vec<Span>,

    /// Ordered word spans
    #[serde(default)]
    pub words: Vec<Span>,
}

impl Transcript {
    /// Create an empty transcript with the given canvas
    pub fn new(resolution: CanvasDecl) -> Self {
        Transcript {
            resolution,
            sentences: Vec::new(),
            words: Vec::new(),
        }
    }

    /// Parse a transcript from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let transcript: Transcript =
            serde_json::from_str(content).context("Failed to parse transcript JSON")?;

        let misordered = count_misordered(&transcript.sentences) + count_misordered(&transcript.words);
        if misordered > 0 {
            warn!("Transcript has {} spans out of start-time order", misordered);
        }

        Ok(transcript)
    }

    /// Load a transcript from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Save the transcript as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize transcript")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write transcript file: {}", path.display()))?;
        Ok(())
    }

    /// Return a new transcript with a word appended to the word sequence
    pub fn with_word_added(&self, word: Span) -> Self {
        let mut next = self.clone();
        next.words.push(word);
        next
    }

    /// Return a new transcript with the word at the given index removed
    pub fn with_word_removed(&self, index: usize) -> Result<Self> {
        if index >= self.words.len() {
            return Err(anyhow!(
                "Word index {} out of range ({} words)",
                index,
                self.words.len()
            ));
        }
        let mut next = self.clone();
        next.words.remove(index);
        Ok(next)
    }

    /// Return a new transcript with a sentence appended to the sentence sequence
    pub fn with_sentence_added(&self, sentence: Span) -> Self {
        let mut next = self.clone();
        next.sentences.push(sentence);
        next
    }

    /// Return a new transcript with the sentence at the given index removed
    pub fn with_sentence_removed(&self, index: usize) -> Result<Self> {
        if index >= self.sentences.len() {
            return Err(anyhow!(
                "Sentence index {} out of range ({} sentences)",
                index,
                self.sentences.len()
            ));
        }
        let mut next = self.clone();
        next.sentences.remove(index);
        Ok(next)
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Transcript")?;
        writeln!(
            f,
            "Canvas: {}x{} @ {} fps",
            self.resolution.width, self.resolution.height, self.resolution.fps
        )?;
        writeln!(f, "Sentences: {}", self.sentences.len())?;
        writeln!(f, "Words: {}", self.words.len())?;
        Ok(())
    }
}

/// Count spans whose start time precedes the previous span's start time
fn count_misordered(spans: &[Span]) -> usize {
    spans
        .windows(2)
        .filter(|pair| pair[1].start < pair[0].start)
        .count()
}

/// Path of the persisted transcript for a given video stem inside the output folder
pub fn transcript_path<P: AsRef<Path>>(output_dir: P, base_name: &str) -> PathBuf {
    output_dir.as_ref().join(base_name).join("transcript.json")
}
