use thiserror::Error;

/// A string did not name an entry in one of the static lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {table} '{key}'; expected one of: {}", expected.join(", "))]
pub struct UnknownKeyError {
    pub table: &'static str,
    pub key: String,
    pub expected: Vec<&'static str>,
}

/// Case-insensitive lookup of `input` against the keys of `all`.
pub(crate) fn parse_key<T: Copy>(
    table: &'static str,
    input: &str,
    all: &[T],
    key: impl Fn(&T) -> &'static str,
) -> Result<T, UnknownKeyError> {
    let trimmed = input.trim();
    all.iter()
        .copied()
        .find(|item| key(item).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownKeyError {
            table,
            key: trimmed.to_string(),
            expected: all.iter().map(&key).collect(),
        })
}
