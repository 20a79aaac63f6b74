use log::debug;

use crate::error::{Error, Result};

/// Locates a named option in the token stream and extracts its value window.
///
/// Flag/value pairs may arrive pre-split across tokens because upstream
/// tooling re-quotes arguments containing `=`, so the same option can show up
/// as `name=value`, `name= value` or `name = value`. All three normalize to a
/// canonical 3-token window whose last element is the candidate value.
///
/// An empty window means the option was not present at all.
///
/// # Errors
///
/// Returns [`Error::AmbiguousNamedValue`] when the candidate value is itself
/// the opening token of an option declared *after* `name` in `all_names`:
/// that means `name` was given without a value and what follows does not
/// belong to it. An earlier-declared option colliding textually is not an
/// error; declaration order is the discriminant.
pub fn pick_named(tokens: &[String], name: &str, all_names: &[String]) -> Result<Vec<String>> {
    let Some(found_at) = tokens
        .iter()
        .position(|token| token == name || token.starts_with(name))
    else {
        return Ok(Vec::new());
    };

    let glued = format!("{name}=");
    let matched = &tokens[found_at];

    let window = if matched.contains(&glued) {
        let embedded = matched.replacen(&glued, "", 1);
        let value = if embedded.is_empty() {
            // The shell split the value off; it is the next token, if any.
            tokens.get(found_at + 1).cloned().unwrap_or_default()
        } else {
            embedded
        };
        vec![name.to_string(), "=".to_string(), value]
    } else {
        // Bare `name` token: the `name = value` form spans three tokens.
        let end = (found_at + 3).min(tokens.len());
        let mut window = tokens[found_at..end].to_vec();
        window.resize(3, String::new());
        window
    };

    let candidate = window.last().cloned().unwrap_or_default();
    let own_position = all_names
        .iter()
        .position(|declared| declared == name)
        .map_or(-1, |position| position as isize);

    let conflict = all_names.iter().enumerate().find(|(_, other)| {
        other.as_str() != name
            && (candidate == **other || candidate.contains(&format!("{other}=")))
    });

    if let Some((position, other)) = conflict {
        if position as isize > own_position {
            return Err(Error::AmbiguousNamedValue {
                name: name.to_string(),
                value: candidate,
                conflicts_with: other.clone(),
            });
        }
    }

    debug!("extracted `{name}` as {window:?}");
    Ok(window)
}
