use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::Error::{
    DuplicateKey, EmptyChoices, MissingQuestion, NoOptionsDefined, ReservedKey,
};
use crate::error::Result;
use crate::option_definitions::{ChoiceDefinition, OptionDefinition, PromptDefinition};
use crate::pipeline::RequiredRule;

/// Reserved first positional token that short-circuits parsing into the
/// generated option summary.
pub const RESERVED_HELP_KEY: &str = "help";

/// The declared option groups for one command, in resolution order:
/// positional, named, free-text prompts, single-select questions.
///
/// Group maps preserve declaration order; positional values are assigned by
/// that order and the named-option ambiguity check depends on it. Named keys
/// are matched verbatim against tokens, so they normally carry their `--`
/// prefix.
#[derive(Debug)]
pub struct CommandSchema {
    positional: IndexMap<String, OptionDefinition>,
    named: IndexMap<String, OptionDefinition>,
    prompts: IndexMap<String, PromptDefinition>,
    selects: IndexMap<String, ChoiceDefinition>,
    required_rule: RequiredRule,
}

impl CommandSchema {
    /// Validates and assembles a schema.
    ///
    /// # Errors
    ///
    /// Construction is where programmer misuse is caught, synchronously:
    /// no options declared at all, the reserved `help` key, a prompt or
    /// select without a question, a select without choices, or the same key
    /// declared in more than one group.
    pub fn new(
        positional: IndexMap<String, OptionDefinition>,
        named: IndexMap<String, OptionDefinition>,
        prompts: IndexMap<String, PromptDefinition>,
        selects: IndexMap<String, ChoiceDefinition>,
    ) -> Result<Self> {
        if positional.is_empty() && named.is_empty() && prompts.is_empty() && selects.is_empty() {
            return Err(NoOptionsDefined);
        }

        for (key, prompt) in &prompts {
            if prompt.question.is_empty() {
                return Err(MissingQuestion(key.clone()));
            }
        }

        for (key, choice) in &selects {
            if choice.question.is_empty() {
                return Err(MissingQuestion(key.clone()));
            }
            if choice.choices.is_empty() {
                return Err(EmptyChoices(key.clone()));
            }
        }

        let mut seen = HashSet::new();
        for key in positional
            .keys()
            .chain(named.keys())
            .chain(prompts.keys())
            .chain(selects.keys())
        {
            if key == RESERVED_HELP_KEY {
                return Err(ReservedKey);
            }
            if !seen.insert(key.clone()) {
                return Err(DuplicateKey(key.clone()));
            }
        }

        Ok(Self {
            positional,
            named,
            prompts,
            selects,
            required_rule: RequiredRule::default(),
        })
    }

    /// Overrides how `required` declarations are judged.
    #[must_use]
    pub fn with_required_rule(mut self, rule: RequiredRule) -> Self {
        self.required_rule = rule;
        self
    }

    #[must_use]
    pub fn positional(&self) -> &IndexMap<String, OptionDefinition> {
        &self.positional
    }

    #[must_use]
    pub fn named(&self) -> &IndexMap<String, OptionDefinition> {
        &self.named
    }

    #[must_use]
    pub fn prompts(&self) -> &IndexMap<String, PromptDefinition> {
        &self.prompts
    }

    #[must_use]
    pub fn selects(&self) -> &IndexMap<String, ChoiceDefinition> {
        &self.selects
    }

    #[must_use]
    pub fn required_rule(&self) -> RequiredRule {
        self.required_rule
    }

    /// Named keys in declaration order, as passed to the extractor.
    #[must_use]
    pub fn named_keys(&self) -> Vec<String> {
        self.named.keys().cloned().collect()
    }

    /// True when any positional or named option is declared `required`,
    /// meaning an empty token stream cannot satisfy the schema.
    #[must_use]
    pub fn has_required_argument_options(&self) -> bool {
        self.positional
            .values()
            .chain(self.named.values())
            .any(|definition| definition.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn definition(description: &str) -> OptionDefinition {
        OptionDefinition {
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn choice(question: &str, choices: &[&str]) -> ChoiceDefinition {
        ChoiceDefinition {
            option: OptionDefinition::default(),
            question: question.to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_no_groups_at_all_is_an_error() {
        let result = CommandSchema::new(
            IndexMap::new(),
            IndexMap::new(),
            IndexMap::new(),
            IndexMap::new(),
        );
        assert!(matches!(result, Err(Error::NoOptionsDefined)));
    }

    #[test]
    fn test_reserved_help_key_is_rejected_in_any_group() {
        let named = IndexMap::from([("help".to_string(), definition("oops"))]);
        let result = CommandSchema::new(IndexMap::new(), named, IndexMap::new(), IndexMap::new());
        assert!(matches!(result, Err(Error::ReservedKey)));
    }

    #[test]
    fn test_duplicate_key_across_groups_is_rejected() {
        let positional = IndexMap::from([("x".to_string(), definition("first"))]);
        let selects = IndexMap::from([("x".to_string(), choice("pick one?", &["a", "b"]))]);
        let result = CommandSchema::new(positional, IndexMap::new(), IndexMap::new(), selects);
        assert!(matches!(result, Err(Error::DuplicateKey(key)) if key == "x"));
    }

    #[test]
    fn test_select_without_choices_is_rejected() {
        let selects = IndexMap::from([("color".to_string(), choice("pick one?", &[]))]);
        let result = CommandSchema::new(IndexMap::new(), IndexMap::new(), IndexMap::new(), selects);
        assert!(matches!(result, Err(Error::EmptyChoices(key)) if key == "color"));
    }

    #[test]
    fn test_select_without_question_is_rejected() {
        let selects = IndexMap::from([("color".to_string(), choice("", &["a"]))]);
        let result = CommandSchema::new(IndexMap::new(), IndexMap::new(), IndexMap::new(), selects);
        assert!(matches!(result, Err(Error::MissingQuestion(key)) if key == "color"));
    }

    #[test]
    fn test_prompt_without_question_is_rejected() {
        let prompts = IndexMap::from([(
            "greeting".to_string(),
            PromptDefinition {
                option: OptionDefinition::default(),
                question: String::new(),
            },
        )]);
        let result = CommandSchema::new(IndexMap::new(), IndexMap::new(), prompts, IndexMap::new());
        assert!(matches!(result, Err(Error::MissingQuestion(key)) if key == "greeting"));
    }

    #[test]
    fn test_required_argument_options_detection() {
        let named = IndexMap::from([(
            "--env".to_string(),
            OptionDefinition {
                required: true,
                ..Default::default()
            },
        )]);
        let schema =
            CommandSchema::new(IndexMap::new(), named, IndexMap::new(), IndexMap::new()).unwrap();
        assert!(schema.has_required_argument_options());

        let prompts = IndexMap::from([(
            "greeting".to_string(),
            PromptDefinition {
                option: OptionDefinition {
                    required: true,
                    ..Default::default()
                },
                question: "say hi?".to_string(),
            },
        )]);
        let schema =
            CommandSchema::new(IndexMap::new(), IndexMap::new(), prompts, IndexMap::new()).unwrap();
        // Prompt questions are asked interactively; they never require tokens.
        assert!(!schema.has_required_argument_options());
    }

    #[test]
    fn test_named_keys_preserve_declaration_order() {
        let named = IndexMap::from([
            ("--b".to_string(), definition("second")),
            ("--a".to_string(), definition("first")),
        ]);
        let schema =
            CommandSchema::new(IndexMap::new(), named, IndexMap::new(), IndexMap::new()).unwrap();
        assert_eq!(schema.named_keys(), vec!["--b", "--a"]);
    }
}
