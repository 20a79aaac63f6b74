use crate::option_definitions::{OptionDefinition, ResolvedOption, Validity};

/// How a `required` declaration is interpreted when judging a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequiredRule {
    /// A required option with an empty (post-transform) value is invalid.
    #[default]
    RejectEmpty,
    /// A required option with a non-empty (post-transform) value is invalid.
    ///
    /// Historical quirk kept for compatibility: the check negated the value
    /// itself instead of its emptiness. Only useful when output must match
    /// that behavior bit-for-bit.
    RejectPresent,
}

/// Runs one raw value through transform and validation.
///
/// The transformer, when present, rewrites the value first. The required
/// check applies next, per `rule`. The validator only runs while the value is
/// still considered valid, and its verdict is final. The message attached to
/// an invalid value is, in order of precedence: the validator's own reason,
/// the definition's `validation_msg`, or a generated default.
///
/// Pure; safe to call repeatedly.
#[must_use]
pub fn resolve(
    key: &str,
    raw: &str,
    definition: &OptionDefinition,
    rule: RequiredRule,
) -> ResolvedOption {
    let value = match &definition.transformer {
        Some(transform) => transform(raw.to_string()),
        None => raw.to_string(),
    };

    let mut verdict = match rule {
        _ if !definition.required => Validity::Valid,
        RequiredRule::RejectEmpty if value.is_empty() => Validity::Invalid(None),
        RequiredRule::RejectPresent if !value.is_empty() => Validity::Invalid(None),
        _ => Validity::Valid,
    };

    if verdict.is_valid() {
        if let Some(validate) = &definition.validator {
            verdict = validate(&value);
        }
    }

    let validation_msg = match verdict {
        Validity::Valid => String::new(),
        Validity::Invalid(reason) => reason.unwrap_or_else(|| {
            if definition.validation_msg.is_empty() {
                format!("Options \"{key}\" is required")
            } else {
                definition.validation_msg.clone()
            }
        }),
    };

    ResolvedOption {
        value,
        validation_msg,
        description: definition.description.clone(),
        question: None,
    }
}
