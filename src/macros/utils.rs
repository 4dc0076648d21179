// src/macros/utils.rs

//! Identifier helpers shared by the validator and the expansion rules.
//!
//! Generated names are derived from user-supplied names by changing the case
//! of the first character only: `MyStyle` becomes the property `myStyle`,
//! `Title` becomes the field `title`. Identifiers follow Unicode `XID`
//! rules, the same ones the declaration grammar accepts.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_\p{XID_Start}]\p{XID_Continue}*$").expect("Invalid identifier regex pattern"));

/// `Title` -> `title`. Only the first character changes.
pub fn with_first_character_lowercased(name: &str) -> String {
    map_first_character(name, |c, out| out.extend(c.to_lowercase()))
}

/// `title` -> `Title`. Only the first character changes.
pub fn with_first_character_uppercased(name: &str) -> String {
    map_first_character(name, |c, out| out.extend(c.to_uppercase()))
}

fn map_first_character(name: &str, f: impl FnOnce(char, &mut String)) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(name.len());
            f(first, &mut result);
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// True when `name` can be used verbatim as a generated type or member name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// `a` or `an` for the given word, by its first letter.
pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
