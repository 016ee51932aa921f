//! Turning external request fields into [`GenerationOptions`]
//!
//! Shared by the HTML form, the JSON API and the command line.

use crate::error::{PassGenError, Result};
use crate::types::{CharacterClass, GenerationOptions};

/// Form field carrying the requested length
pub const LENGTH_FIELD: &str = "length";

/// Form field carrying one selected set; repeated once per set
pub const SETS_FIELD: &str = "sets";

/// Parse a positive length
pub fn parse_length(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(length) if length > 0 => Ok(length),
        _ => Err(PassGenError::invalid_length(raw)),
    }
}

/// Map set tokens to classes, skipping tokens that name no class.
///
/// Fails with [`PassGenError::NoClassSelected`] when no known set remains.
pub fn parse_classes<I, S>(tokens: I) -> Result<Vec<CharacterClass>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classes = Vec::new();
    for token in tokens {
        match token.as_ref().parse::<CharacterClass>() {
            Ok(class) => classes.push(class),
            Err(_) => tracing::debug!(token = token.as_ref(), "Ignoring unknown character set"),
        }
    }

    if classes.is_empty() {
        return Err(PassGenError::NoClassSelected);
    }
    Ok(classes)
}

/// Build options from urlencoded form pairs (`length=10&sets=digits&sets=upper`)
pub fn parse_form(fields: &[(String, String)]) -> Result<GenerationOptions> {
    let raw_length = fields
        .iter()
        .find(|(key, _)| key == LENGTH_FIELD)
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    let length = parse_length(raw_length)?;

    let sets = fields
        .iter()
        .filter(|(key, _)| key == SETS_FIELD)
        .map(|(_, value)| value.as_str());
    let classes = parse_classes(sets)?;

    Ok(GenerationOptions::new(length, classes))
}
