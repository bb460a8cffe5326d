//! Resolving ids typed on the command line.
//!
//! Ids are long opaque strings; any unambiguous prefix of one is accepted,
//! so the short ids printed in listings can be typed back.

use spesa_core::Id;

/// Characters of an id shown in listings.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &Id) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

#[derive(Debug, PartialEq)]
pub enum IdError {
    NotFound(String),
    Ambiguous(String, usize),
}

impl std::fmt::Display for IdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdError::NotFound(prefix) => write!(f, "No entry matches id '{}'", prefix),
            IdError::Ambiguous(prefix, count) => write!(
                f,
                "Id '{}' is ambiguous ({} matches), type more characters",
                prefix, count
            ),
        }
    }
}

impl std::error::Error for IdError {}

/// Find the single id in `ids` starting with `prefix` (case-insensitive).
///
/// An exact match wins even when it is also a prefix of another id.
pub fn resolve_id<'a, I>(ids: I, prefix: &str) -> Result<Id, IdError>
where
    I: IntoIterator<Item = &'a Id>,
{
    let needle = prefix.trim().to_lowercase();
    if needle.is_empty() {
        return Err(IdError::NotFound(prefix.to_string()));
    }

    let matches: Vec<&Id> = ids
        .into_iter()
        .filter(|id| id.as_str().to_lowercase().starts_with(&needle))
        .collect();

    if let Some(exact) = matches.iter().find(|id| id.as_str().to_lowercase() == needle) {
        return Ok((*exact).clone());
    }

    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(IdError::NotFound(prefix.to_string())),
        _ => Err(IdError::Ambiguous(prefix.to_string(), matches.len())),
    }
}
