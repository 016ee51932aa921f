//! Character pool construction

use crate::error::{PassGenError, Result};
use crate::types::{CharacterClass, GenerationOptions};
use std::collections::BTreeSet;

/// Alphabets of the enabled classes, in canonical order.
///
/// Fails with [`PassGenError::NoClassSelected`] when nothing is enabled.
pub fn combine(options: &GenerationOptions) -> Result<Vec<CharacterClass>> {
    let combined: Vec<CharacterClass> = options.classes().collect();
    if combined.is_empty() {
        return Err(PassGenError::NoClassSelected);
    }
    Ok(combined)
}

/// Distinct characters available to one password request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    classes: Vec<CharacterClass>,
    chars: Vec<char>,
}

impl CharacterPool {
    /// Build the pool for `options`, checking that the requested length can be
    /// met without repeating a character and still fits one character per class.
    pub fn for_options(options: &GenerationOptions) -> Result<Self> {
        let classes = combine(options)?;
        let pool = Self::from_classes(classes);
        let length = options.length();

        if length == 0 {
            return Err(PassGenError::invalid_length("0"));
        }
        if length > pool.len() {
            return Err(PassGenError::length_exceeds_pool(length, pool.len()));
        }
        if length < pool.classes.len() {
            return Err(PassGenError::LengthBelowClassCount {
                length,
                classes: pool.classes.len(),
            });
        }

        Ok(pool)
    }

    fn from_classes(classes: Vec<CharacterClass>) -> Self {
        let mut seen = BTreeSet::new();
        let chars = classes
            .iter()
            .flat_map(|class| class.alphabet().iter().copied())
            .filter(|c| seen.insert(*c))
            .collect();

        Self { classes, chars }
    }

    pub fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}
