use super::{Corpus, Language};
use rand::seq::SliceRandom;
use rand::Rng;

/// Sentence shapes the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceTemplate {
    SubjectVerbObject,
    /// Subject + "is" + adjective. Filled with a second SVO draw so no per-language copula is needed.
    SubjectCopulaAdjective,
    AdverbLed,
}

impl SentenceTemplate {
    /// Map a uniform draw in `[0, 1)` onto a template.
    pub fn from_draw(draw: f64) -> Self {
        if draw < 0.5 {
            Self::SubjectVerbObject
        } else if draw < 0.8 {
            Self::SubjectCopulaAdjective
        } else {
            Self::AdverbLed
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_draw(rng.gen::<f64>())
    }
}

fn pick<'a, R: Rng + ?Sized>(entries: &'a [String], rng: &mut R) -> &'a str {
    entries.choose(rng).map(String::as_str).unwrap_or_default()
}

/// Fill `template` from `corpus`. No agreement between slots is modelled.
pub fn build_sentence<R: Rng + ?Sized>(
    corpus: &Corpus,
    language: Language,
    template: SentenceTemplate,
    rng: &mut R,
) -> Vec<String> {
    let parts = &corpus.sentence_parts;
    let subject = pick(&parts.subjects, rng);
    let verb = pick(&parts.verbs, rng);

    let phrases: Vec<&str> = match template {
        SentenceTemplate::SubjectVerbObject | SentenceTemplate::SubjectCopulaAdjective => {
            vec![subject, verb, pick(&parts.objects, rng)]
        }
        SentenceTemplate::AdverbLed => {
            let adverb = pick(&parts.adverbs, rng);
            let object = pick(&parts.objects, rng);
            if language.is_verb_second() {
                vec![adverb, verb, subject, object]
            } else {
                vec![adverb, subject, verb, object]
            }
        }
    };

    let sentence = format!("{}.", phrases.join(" "));
    sentence.split(' ').map(str::to_string).collect()
}

/// One random sentence for `language`, split into space-delimited tokens.
/// The final token carries the closing period.
pub fn synthesize_sentence<R: Rng + ?Sized>(language: Language, rng: &mut R) -> Vec<String> {
    let template = SentenceTemplate::random(rng);
    build_sentence(language.corpus(), language, template, rng)
}
