//! Character-level evaluation of typed input against the target text.

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Display state of one target position.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharClass {
    Untyped,
    Correct,
    Incorrect,
}

/// Result of scoring one appended character.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub index: usize,
    pub expected: char,
    pub typed: char,
    pub outcome: Outcome,
}

/// Exact, case-sensitive comparison. Whitespace mismatches count.
pub fn classify(expected: char, typed: char) -> Outcome {
    if typed == expected {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}

/// Score `typed` as the character at position `input_len`.
/// Returns `None` when the buffer already covers the whole target.
pub fn evaluate_append(target: &[char], input_len: usize, typed: char) -> Option<Evaluation> {
    let expected = *target.get(input_len)?;
    Some(Evaluation {
        index: input_len,
        expected,
        typed,
        outcome: classify(expected, typed),
    })
}

/// Per-position classification of the current buffer, for rendering.
pub fn classify_positions(target: &[char], input: &[char]) -> Vec<CharClass> {
    target
        .iter()
        .enumerate()
        .map(|(idx, &expected)| match input.get(idx) {
            None => CharClass::Untyped,
            Some(&typed) => match classify(expected, typed) {
                Outcome::Correct => CharClass::Correct,
                Outcome::Incorrect => CharClass::Incorrect,
            },
        })
        .collect()
}

/// How a whole-buffer update relates to the previous buffer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BufferEdit {
    /// Length of the common prefix that survives.
    pub keep: usize,
    /// Characters appended after the kept prefix, in order.
    pub appended: Vec<char>,
}

impl BufferEdit {
    pub fn is_noop(&self, previous_len: usize) -> bool {
        self.keep == previous_len && self.appended.is_empty()
    }
}

/// Decompose `previous -> current` into a truncation followed by appends.
pub fn diff_buffers(previous: &[char], current: &[char]) -> BufferEdit {
    let keep = previous
        .iter()
        .zip(current.iter())
        .take_while(|(a, b)| a == b)
        .count();
    BufferEdit {
        keep,
        appended: current[keep..].to_vec(),
    }
}
