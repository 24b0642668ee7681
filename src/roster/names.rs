//! Name list parsing

/// Delimiters accepted between names: ASCII comma, ideographic comma and
/// full-width comma
pub const NAME_DELIMITERS: [char; 3] = [',', '、', '，'];

/// Split free-text input into trimmed, non-empty names
///
/// Duplicates within the input are kept; the store decides what to do with
/// them.
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(NAME_DELIMITERS)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
