//! Person-name shaping for upstream search parameters.

/// First letter upper-cased, the remainder lower-cased.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A name split into the parts the Colorado dataset indexes separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first: Option<String>,
    pub last: String,
}

/// Split free text into first and last name.
///
/// The first token is the first name and everything after it the last name.
/// A single token is a last name. Each part is capitalized on its own.
pub fn split_person_name(text: &str) -> PersonName {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => {
            let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            PersonName {
                first: Some(capitalize(first)),
                last: capitalize(&rest),
            }
        }
        None => PersonName {
            first: None,
            last: capitalize(text),
        },
    }
}

/// Reorder `"first last"` into the `"last, first"` form the California
/// name index expects. Anything else (one token, three or more tokens,
/// already comma-separated) passes through trimmed but otherwise untouched.
pub fn last_name_first(text: &str) -> String {
    let text = text.trim();
    if text.contains(',') {
        return text.to_string();
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [first, last] => format!("{}, {}", last, first),
        _ => text.to_string(),
    }
}
