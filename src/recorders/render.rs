//! Field renderings used in recorded lines
//!
//! Booleans render as `True`/`False`, string sequences as `['a', 'b']`,
//! numbers in their shortest `Display` form and concepts as JSON with a space
//! after every `,` and `:`.

pub use crate::value_objects::json::{SpacedFormatter, concepts_json};

pub fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

pub fn number(value: f64) -> String {
    value.to_string()
}

/// Render a sequence of strings as a bracketed, single-quoted list
pub fn sequence(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| {
            let escaped = item.replace('\\', "\\\\").replace('\'', "\\'");
            format!("'{escaped}'")
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}
