//! Label normalization.
//!
//! Maps an arbitrary component label to an identifier-safe camel token:
//! `"my-widget"` becomes `MyWidget`. The separator contract is the ASCII
//! set {space, hyphen, underscore, colon}.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[ \-_:]+").unwrap();
}

pub fn to_camel_case(label: &str) -> String {
    SEPARATORS
        .split(label)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
