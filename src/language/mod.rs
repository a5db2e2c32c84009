pub mod formatter;
pub mod sentences;

use crate::error::{PixelTypeError, PtResult};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

pub use formatter::{BinaryFormatter, PlainFormatter, TokenFormatter};
pub use sentences::{synthesize_sentence, SentenceTemplate};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

static CORPORA: OnceLock<Corpora> = OnceLock::new();

/// The closed set of practice languages.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[value(alias = "german")]
    De,
    #[default]
    #[value(alias = "english")]
    En,
    #[value(alias = "spanish")]
    Es,
    #[value(alias = "french")]
    Fr,
    #[value(alias = "italian")]
    It,
    #[value(alias = "dutch")]
    Nl,
}

impl Language {
    /// Parse a language code, falling back to the default language for anything unsupported.
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_else(|_| {
            warn!(code, fallback = %Language::default(), "unsupported language code");
            Language::default()
        })
    }

    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::De => "German",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::It => "Italian",
            Self::Nl => "Dutch",
        }
    }

    /// Languages whose adverb-led clauses put the verb second.
    pub fn is_verb_second(&self) -> bool {
        matches!(self, Self::De | Self::Nl)
    }

    /// Next language in declaration order, wrapping around.
    pub fn cycle(&self) -> Self {
        let all: Vec<Language> = Language::iter().collect();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn corpus(&self) -> &'static Corpus {
        corpora().get(*self)
    }
}

/// Word lists used to fill the sentence templates.
#[derive(Deserialize, Clone, Debug)]
pub struct SentenceParts {
    pub subjects: Vec<String>,
    pub verbs: Vec<String>,
    pub objects: Vec<String>,
    pub adjectives: Vec<String>,
    pub adverbs: Vec<String>,
}

impl SentenceParts {
    fn slots(&self) -> [(&'static str, &Vec<String>); 5] {
        [
            ("subjects", &self.subjects),
            ("verbs", &self.verbs),
            ("objects", &self.objects),
            ("adjectives", &self.adjectives),
            ("adverbs", &self.adverbs),
        ]
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub code: String,
    pub words: Vec<String>,
    pub sentence_parts: SentenceParts,
}

impl Corpus {
    fn validate(&self) -> PtResult<()> {
        if self.words.is_empty() {
            return Err(PixelTypeError::Corpus(format!(
                "{}: word list is empty",
                self.code
            )));
        }
        for (slot, entries) in self.sentence_parts.slots() {
            if entries.is_empty() {
                return Err(PixelTypeError::Corpus(format!(
                    "{}: sentence part '{slot}' is empty",
                    self.code
                )));
            }
        }
        Ok(())
    }

    /// Uniform draw, with replacement.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.words.choose(rng).map(String::as_str).unwrap_or_default()
    }

    pub fn random_words<R: Rng + ?Sized>(&self, num: usize, rng: &mut R) -> Vec<String> {
        (0..num)
            .map(|_| self.random_word(rng).to_string())
            .collect()
    }
}

/// Every supported language's corpus, validated at load.
#[derive(Debug)]
pub struct Corpora {
    by_language: HashMap<Language, Corpus>,
}

impl Corpora {
    pub fn load() -> PtResult<Self> {
        let mut by_language = HashMap::new();
        for language in Language::iter() {
            let corpus = read_corpus_from_file(&format!("{}.json", language.code()))?;
            if corpus.code != language.code() {
                return Err(PixelTypeError::Corpus(format!(
                    "{}.json declares code '{}'",
                    language.code(),
                    corpus.code
                )));
            }
            corpus.validate()?;
            debug!(language = %language, words = corpus.words.len(), "loaded corpus");
            by_language.insert(language, corpus);
        }
        Ok(Self { by_language })
    }

    pub fn get(&self, language: Language) -> &Corpus {
        &self.by_language[&language]
    }
}

/// Load and validate all corpora once. Call at startup to fail fast.
pub fn init() -> PtResult<&'static Corpora> {
    if let Some(corpora) = CORPORA.get() {
        return Ok(corpora);
    }
    let loaded = Corpora::load()?;
    Ok(CORPORA.get_or_init(|| loaded))
}

pub fn corpora() -> &'static Corpora {
    CORPORA.get_or_init(|| Corpora::load().expect("embedded language corpus is invalid"))
}

fn read_corpus_from_file(file_name: &str) -> PtResult<Corpus> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| PixelTypeError::Corpus(format!("{file_name} not found")))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| PixelTypeError::Corpus(format!("{file_name} is not valid UTF-8")))?;

    Ok(serde_json::from_str(file_as_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_language_has_a_valid_corpus() {
        let corpora = Corpora::load().unwrap();
        for language in Language::iter() {
            let corpus = corpora.get(language);
            assert_eq!(corpus.code, language.code());
            assert!(!corpus.words.is_empty());
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::De.code(), "de");
        assert_eq!(Language::Nl.to_string(), "nl");
        assert_eq!(Language::from_code("fr"), Language::Fr);
        assert_eq!(Language::from_code(" IT "), Language::It);
    }

    #[test]
    fn test_unsupported_code_falls_back_to_english() {
        assert_eq!(Language::from_code("pt"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_verb_second_languages() {
        let v2: Vec<Language> = Language::iter().filter(|l| l.is_verb_second()).collect();
        assert_eq!(v2, vec![Language::De, Language::Nl]);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Language::De.cycle(), Language::En);
        assert_eq!(Language::Nl.cycle(), Language::De);
    }

    #[test]
    fn test_random_words_are_drawn_from_corpus() {
        let corpus = Language::En.corpus();
        let mut rng = StdRng::seed_from_u64(7);
        let words = corpus.random_words(50, &mut rng);

        assert_eq!(words.len(), 50);
        for word in &words {
            assert!(corpus.words.contains(word));
        }
    }

    #[test]
    fn test_random_words_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Language::De.corpus().random_words(0, &mut rng).is_empty());
    }

    #[test]
    fn test_corpus_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "code": "xx",
            "words": ["hello", "world"],
            "sentence_parts": {
                "subjects": ["The dog"],
                "verbs": ["sees"],
                "objects": ["a cat"],
                "adjectives": ["red"],
                "adverbs": ["today"]
            }
        }
        "#;

        let corpus: Corpus = serde_json::from_str(json_data).unwrap();
        assert_eq!(corpus.name, "test");
        assert_eq!(corpus.words.len(), 2);
        assert!(corpus.validate().is_ok());
    }

    #[test]
    fn test_empty_sentence_part_is_rejected() {
        let json_data = r#"
        {
            "name": "test",
            "code": "xx",
            "words": ["hello"],
            "sentence_parts": {
                "subjects": ["The dog"],
                "verbs": [],
                "objects": ["a cat"],
                "adjectives": ["red"],
                "adverbs": ["today"]
            }
        }
        "#;

        let corpus: Corpus = serde_json::from_str(json_data).unwrap();
        let err = corpus.validate().unwrap_err();
        assert!(err.to_string().contains("verbs"));
    }

    #[test]
    fn test_read_nonexistent_corpus_file() {
        assert!(read_corpus_from_file("nonexistent.json").is_err());
    }

    #[test]
    fn test_init_is_idempotent() {
        let a = init().unwrap() as *const Corpora;
        let b = init().unwrap() as *const Corpora;
        assert_eq!(a, b);
    }
}
