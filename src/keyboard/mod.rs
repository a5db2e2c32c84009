//! Physical keyboard layouts and the finger/key resolver.
//!
//! Every key carries the finger that owns it. The resolver answers "which key,
//! and which finger, produces the next expected character" for a layout.

pub mod layouts;

use crate::error::{PixelTypeError, PtResult};
use crate::language::Language;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;

static LAYOUTS: OnceLock<HashMap<Language, KeyboardLayout>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// The ten fingers, numbered left pinky (0) through right pinky (9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "title_case")]
pub enum Finger {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    LeftThumb,
    RightThumb,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
}

impl Finger {
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        Finger::iter().nth(idx as usize)
    }

    pub fn hand(&self) -> Hand {
        if self.index() <= 4 {
            Hand::Left
        } else {
            Hand::Right
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyDef {
    pub label: &'static str,
    /// Character produced without modifiers. Empty or multi-char for control keys.
    pub value: &'static str,
    pub shift_value: Option<&'static str>,
    pub finger: Finger,
    /// Relative width, 1.0 being a standard key.
    pub width: f32,
}

impl KeyDef {
    /// True when this key produces `normalized` (already lowercased) as primary or shifted value.
    fn produces(&self, normalized: &str) -> bool {
        self.value == normalized
            || self
                .shift_value
                .is_some_and(|shifted| shifted.to_lowercase() == normalized)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    pub id: &'static str,
    pub name: &'static str,
    pub rows: Vec<Vec<KeyDef>>,
}

/// Row/column of a key inside its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPosition {
    pub row: usize,
    pub col: usize,
}

/// A resolved key together with where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyTarget<'a> {
    pub key: &'a KeyDef,
    pub position: KeyPosition,
}

impl KeyboardLayout {
    pub fn keys(&self) -> impl Iterator<Item = (KeyPosition, &KeyDef)> {
        self.rows.iter().enumerate().flat_map(|(row, keys)| {
            keys.iter()
                .enumerate()
                .map(move |(col, key)| (KeyPosition { row, col }, key))
        })
    }

    pub fn for_language(language: Language) -> &'static KeyboardLayout {
        &layouts_table()[&language]
    }

    /// Check that no printable character is produced by two keys.
    pub fn validate(&self) -> PtResult<()> {
        if self.rows.is_empty() {
            return Err(PixelTypeError::Layout(format!("{}: no rows", self.id)));
        }
        let mut seen = HashSet::new();
        for (position, key) in self.keys() {
            let produced = std::iter::once(key.value.to_string())
                .chain(key.shift_value.map(str::to_lowercase))
                .filter(|v| v.chars().count() == 1);
            for value in produced {
                if !seen.insert(value.clone()) {
                    return Err(PixelTypeError::Layout(format!(
                        "{}: '{value}' mapped twice (row {}, col {})",
                        self.id, position.row, position.col
                    )));
                }
            }
        }
        Ok(())
    }
}

fn normalize(target: char) -> String {
    if target == ' ' {
        return target.to_string();
    }
    target.to_lowercase().collect()
}

/// First key, in row-major order, that produces `target`.
pub fn resolve_key(target: char, layout: &KeyboardLayout) -> Option<KeyTarget<'_>> {
    let normalized = normalize(target);
    layout
        .keys()
        .find(|(_, key)| key.produces(&normalized))
        .map(|(position, key)| KeyTarget { key, position })
}

/// Finger responsible for `target`, or `None` when no key produces it.
pub fn resolve_finger(target: char, layout: &KeyboardLayout) -> Option<Finger> {
    resolve_key(target, layout).map(|t| t.key.finger)
}

fn layouts_table() -> &'static HashMap<Language, KeyboardLayout> {
    LAYOUTS.get_or_init(|| {
        Language::iter()
            .map(|language| (language, layouts::build(language)))
            .collect()
    })
}

/// Build and validate every layout. Call at startup to fail fast.
pub fn init() -> PtResult<()> {
    for (language, layout) in layouts_table() {
        if layout.id != language.code() {
            return Err(PixelTypeError::Layout(format!(
                "layout for {language} has id {}",
                layout.id
            )));
        }
        layout.validate()?;
        debug!(language = %language, layout = layout.name, "validated layout");
    }
    Ok(())
}
