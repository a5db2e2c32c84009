use crate::language::{formatter::formatter_for, synthesize_sentence, Language};
use clap::ValueEnum;
use rand::Rng;
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::debug;

/// Kind of practice text to produce
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Words,
    Sentences,
    Mixed,
}

impl Mode {
    pub fn cycle(&self) -> Self {
        match self {
            Self::Words => Self::Sentences,
            Self::Sentences => Self::Mixed,
            Self::Mixed => Self::Words,
        }
    }
}

/// Ordered tokens for one session. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedContent {
    tokens: Vec<String>,
}

impl GeneratedContent {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Split a caller-supplied prompt into space-delimited tokens.
    pub fn from_prompt(prompt: &str) -> Self {
        Self::new(prompt.split_whitespace().map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens joined with single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Length of a plain word run between sentences in mixed mode.
pub const MIXED_WORD_RUN: RangeInclusive<usize> = 3..=6;

/// One mixed-mode chunk: a full sentence or a short run of plain words,
/// each with even odds.
fn mixed_chunk<R: Rng + ?Sized>(language: Language, rng: &mut R) -> Vec<String> {
    if rng.gen_bool(0.5) {
        synthesize_sentence(language, rng)
    } else {
        let run = rng.gen_range(MIXED_WORD_RUN);
        language.corpus().random_words(run, rng)
    }
}

/// Produce exactly `count` tokens for `mode` in `language`.
pub fn generate_content<R: Rng + ?Sized>(
    mode: Mode,
    language: Language,
    count: usize,
    rng: &mut R,
) -> GeneratedContent {
    let corpus = language.corpus();
    let mut tokens: Vec<String> = Vec::with_capacity(count + 8);

    match mode {
        Mode::Words => {
            tokens = corpus.random_words(count, rng);
        }
        Mode::Sentences => {
            while tokens.len() < count {
                tokens.extend(synthesize_sentence(language, rng));
            }
        }
        Mode::Mixed => {
            while tokens.len() < count {
                tokens.extend(mixed_chunk(language, rng));
            }
        }
    }

    // overshoot from the last sentence is cut, possibly mid-sentence
    tokens.truncate(count);
    GeneratedContent::new(tokens)
}

/// Configuration for content generation
#[derive(Debug, Clone)]
pub struct WordGenConfig {
    pub mode: Mode,
    pub language: Language,
    pub number_of_words: usize,
    pub binary: bool,
    pub custom_prompt: Option<String>,
}

/// Handles all content generation for a session
pub struct WordGenerator {
    config: WordGenConfig,
}

impl WordGenerator {
    pub fn new(config: WordGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self) -> GeneratedContent {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedContent {
        if let Some(ref prompt) = self.config.custom_prompt {
            return GeneratedContent::from_prompt(prompt);
        }

        let content = generate_content(
            self.config.mode,
            self.config.language,
            self.config.number_of_words,
            rng,
        );
        debug!(
            mode = %self.config.mode,
            language = %self.config.language,
            tokens = content.token_count(),
            "generated content"
        );

        let formatter = formatter_for(self.config.binary);
        GeneratedContent::new(formatter.format_all(content.tokens))
    }
}
