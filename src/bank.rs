//! Question bank loading and normalization
//!
//! This module combines multiple question sources into one deduplicated
//! bank. Sources deliver raw JSON arrays whose field names vary between
//! banks; loading normalizes every accepted alias, applies defaults for
//! missing fields, skips records that cannot be salvaged, and drops
//! duplicate questions while preserving first-seen order. A failing source
//! is logged and skipped, never aborting the load.

use garde::Validate;
use itertools::Itertools;
use once_cell_serde::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::question::{Difficulty, QuestionRecord};

/// Errors produced while fetching or parsing a single question source
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not deliver its payload
    #[error("source unavailable: {0}")]
    Unavailable(String),
    /// The payload was not a valid JSON array of question records
    #[error("malformed source payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single source of raw question data
///
/// Implementations deliver the JSON body of one bank file. How the body is
/// obtained (bundled asset, filesystem, network) is the caller's concern;
/// the loader only needs the text and an identifier for diagnostics.
pub trait QuestionSource {
    /// Returns an identifier for this source, used in log messages
    fn id(&self) -> &str;

    /// Fetches the raw JSON body of this source
    fn fetch(&self) -> Result<String, Error>;
}

/// A question source backed by an in-memory JSON string
///
/// Useful for banks bundled into the binary and for tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    id: String,
    body: String,
}

impl StaticSource {
    /// Creates a source from an identifier and a JSON body
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

impl QuestionSource for StaticSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<String, Error> {
        Ok(self.body.clone())
    }
}

/// One element of a bank file before normalization
///
/// Question banks in the wild disagree on field names, so every field
/// accepts the known aliases and is optional. [`RawRecord::normalize`]
/// decides whether the record is usable.
#[derive(Debug, Deserialize)]
struct RawRecord {
    /// Question text: `question`, `q`, or `text`
    #[serde(alias = "q", alias = "text")]
    question: Option<String>,
    /// Answer choices: `choices`, `options`, or `answers`
    #[serde(alias = "options", alias = "answers")]
    choices: Option<Vec<String>>,
    /// Correct answer index: `answerIndex` or `correctIndex`, defaults to 0
    #[serde(rename = "answerIndex", alias = "correctIndex")]
    answer_index: Option<usize>,
    /// Explanation: `explanation`, `explain`, or `expl`, defaults to empty
    #[serde(alias = "explain", alias = "expl")]
    explanation: Option<String>,
    /// Difficulty label, defaults to medium
    difficulty: Option<String>,
    /// Category: `category` or `topic`, defaults to "General"
    #[serde(alias = "topic")]
    category: Option<String>,
}

impl RawRecord {
    /// Normalizes a raw record into a [`QuestionRecord`]
    ///
    /// Returns `None` when the record has no usable question text or no
    /// choices. A missing or out-of-range answer index falls back to 0.
    fn normalize(self) -> Option<QuestionRecord> {
        let text = self.question?.trim().to_owned();
        if text.is_empty() {
            return None;
        }
        let choices = self.choices?;
        if choices.is_empty() {
            return None;
        }

        let answer_index = match self.answer_index {
            Some(index) if index < choices.len() => index,
            _ => 0,
        };

        Some(QuestionRecord {
            text,
            choices,
            answer_index,
            explanation: self.explanation.unwrap_or_default(),
            difficulty: self
                .difficulty
                .as_deref()
                .map_or(Difficulty::Medium, Difficulty::parse_lenient),
            category: self
                .category
                .unwrap_or_else(|| crate::constants::question::DEFAULT_CATEGORY.to_owned()),
        })
    }
}

/// Parses one source body into normalized records
///
/// Records that fail normalization or validation are dropped individually;
/// only a body that is not a JSON array at all is an error.
fn parse_source(body: &str) -> Result<Vec<QuestionRecord>, Error> {
    let raw: Vec<RawRecord> = serde_json::from_str(body)?;

    Ok(raw
        .into_iter()
        .filter_map(RawRecord::normalize)
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(report) => {
                warn!(question = %record.text, %report, "dropping invalid record");
                false
            }
        })
        .collect_vec())
}

/// Loads and caches the combined question bank
///
/// The bank is computed at most once per loader; repeated calls to
/// [`BankLoader::load`] return the cached result.
pub struct BankLoader {
    /// The sources combined into the bank, in order
    sources: Vec<Box<dyn QuestionSource>>,
    /// Deduplicated bank, computed on first load
    cache: OnceCell<Vec<QuestionRecord>>,
}

impl std::fmt::Debug for BankLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankLoader")
            .field("sources", &self.sources.len())
            .field("loaded", &self.cache.get().is_some())
            .finish()
    }
}

impl BankLoader {
    /// Creates a loader over the given sources
    pub fn new(sources: Vec<Box<dyn QuestionSource>>) -> Self {
        Self {
            sources,
            cache: OnceCell::new(),
        }
    }

    /// Returns the combined, deduplicated question bank
    ///
    /// The first call fetches and parses every source; a source that fails
    /// to fetch or parse is logged and skipped. Duplicate questions (same
    /// text) keep only their first occurrence. Subsequent calls return the
    /// cached bank without refetching.
    pub fn load(&self) -> &[QuestionRecord] {
        self.cache.get_or_init(|| self.load_uncached())
    }

    fn load_uncached(&self) -> Vec<QuestionRecord> {
        let mut combined = Vec::new();

        for source in &self.sources {
            match source.fetch().and_then(|body| parse_source(&body)) {
                Ok(records) => combined.extend(records),
                Err(error) => warn!(source = source.id(), %error, "skipping question source"),
            }
        }

        let bank = combined
            .into_iter()
            .unique_by(|record| record.text.clone())
            .collect_vec();

        debug!(count = bank.len(), "question bank loaded");

        bank
    }
}
