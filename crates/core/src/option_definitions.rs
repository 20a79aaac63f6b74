use std::fmt::{Debug, Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

/// Outcome of a validator run.
///
/// An `Invalid` verdict may carry its own reason, which takes precedence over
/// the definition's `validation_msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(Option<String>),
}

impl Validity {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// Rewrites a raw value before validation.
pub type Transformer = Box<dyn Fn(String) -> String>;

/// Judges a (transformed) value, returning an unambiguous verdict.
pub type Validator = Box<dyn Fn(&str) -> Validity>;

/// Declaration for a positional or named option.
///
/// Declared once per option key and immutable for the run. An empty
/// `validation_msg` means the generated default message is used when the
/// value is judged invalid.
#[derive(Default)]
pub struct OptionDefinition {
    pub description: String,
    pub required: bool,
    pub transformer: Option<Transformer>,
    pub validator: Option<Validator>,
    pub validation_msg: String,
}

impl Debug for OptionDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("OptionDefinition")
            .field("description", &self.description)
            .field("required", &self.required)
            .field("transformer", &self.transformer.is_some())
            .field("validator", &self.validator.is_some())
            .field("validation_msg", &self.validation_msg)
            .finish()
    }
}

/// Declaration for a free-text prompt question.
#[derive(Debug, Default)]
pub struct PromptDefinition {
    pub option: OptionDefinition,
    pub question: String,
}

/// Declaration for a single-select question with a fixed choice list.
#[derive(Debug, Default)]
pub struct ChoiceDefinition {
    pub option: OptionDefinition,
    pub question: String,
    pub choices: Vec<String>,
}

/// One resolved option value with its validation outcome.
///
/// An empty `validation_msg` means the value passed validation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub value: String,
    pub validation_msg: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl ResolvedOption {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_msg.is_empty()
    }
}

impl Display for ResolvedOption {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(formatter, "{}", self.value)
        } else {
            write!(formatter, "{} (invalid: {})", self.value, self.validation_msg)
        }
    }
}

/// The uniform output map, keyed by option key in declaration order.
pub type ParsedOptions = IndexMap<String, ResolvedOption>;
