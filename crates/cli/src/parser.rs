use indexmap::IndexMap;
use log::debug;

use askopt_core::error::{Error, Result};
use askopt_core::extractor::pick_named;
use askopt_core::option_definitions::{ParsedOptions, ResolvedOption};
use askopt_core::pipeline::resolve;
use askopt_core::schema::{CommandSchema, RESERVED_HELP_KEY};
use askopt_core::tokens::invocation_tokens;

use crate::help::render_help;
use crate::prompt::prompt_line;
use crate::select::SelectorSession;

/// How a `parse` run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseStatus {
    /// Every declared group was resolved into the option map.
    Completed,
    /// The reserved `help` token was given; the option summary was printed
    /// and nothing was resolved.
    HelpPrinted,
}

/// Walks the declared option groups in a fixed order and accumulates one
/// [`ResolvedOption`] per key: positional, then named, then free-text
/// questions, then choice questions. Questions run strictly sequentially;
/// question *k+1* never starts before *k* has closed.
pub struct CommandParser {
    schema: CommandSchema,
    tokens: Vec<String>,
    parsed: ParsedOptions,
}

impl CommandParser {
    /// Builds a parser over the current process invocation tokens.
    ///
    /// # Errors
    ///
    /// Fails when the package-manager argument payload is present but
    /// malformed.
    pub fn new(schema: CommandSchema) -> Result<Self> {
        let tokens = invocation_tokens()?;
        Ok(Self::with_tokens(schema, tokens))
    }

    /// Builds a parser over an explicit token stream.
    #[must_use]
    pub fn with_tokens(schema: CommandSchema, tokens: Vec<String>) -> Self {
        debug!("invocation tokens: {tokens:?}");
        Self {
            schema,
            tokens,
            parsed: IndexMap::new(),
        }
    }

    /// Resolves all declared groups. Call once per invocation.
    ///
    /// Per-field validation failures are not errors: they land in the
    /// affected option's `validation_msg` and parsing continues, leaving the
    /// caller to inspect the map.
    ///
    /// # Errors
    ///
    /// - an empty token stream while a positional or named option is
    ///   declared `required`;
    /// - a named-option ambiguity (a valueless flag swallowing the opening
    ///   token of a later-declared flag);
    /// - a terminal failure in a prompt or select session. Select failures
    ///   still record a placeholder result for the affected key, and raw
    ///   terminal mode is restored before the error surfaces.
    pub fn parse(&mut self) -> Result<ParseStatus> {
        if self.tokens.is_empty() && self.schema.has_required_argument_options() {
            return Err(Error::MissingRequiredArguments);
        }

        if self
            .tokens
            .first()
            .is_some_and(|token| token == RESERVED_HELP_KEY)
        {
            print!("{}", render_help(&self.schema));
            return Ok(ParseStatus::HelpPrinted);
        }

        self.parse_positional();
        self.parse_named()?;
        self.parse_prompts()?;
        self.parse_selects()?;

        Ok(ParseStatus::Completed)
    }

    /// The resolved option map, in declaration order.
    #[must_use]
    pub fn options(&self) -> &ParsedOptions {
        &self.parsed
    }

    /// A resolved value by key; empty when absent or not yet parsed.
    #[must_use]
    pub fn option_value(&self, key: &str) -> &str {
        self.parsed
            .get(key)
            .map_or("", |resolved| resolved.value.as_str())
    }

    /// Consumes the parser, yielding the resolved map.
    #[must_use]
    pub fn into_options(self) -> ParsedOptions {
        self.parsed
    }

    fn parse_positional(&mut self) {
        let rule = self.schema.required_rule();
        let parsed = &mut self.parsed;
        for (index, (key, definition)) in self.schema.positional().iter().enumerate() {
            let value = self.tokens.get(index).cloned().unwrap_or_default();
            parsed.insert(key.clone(), resolve(key, &value, definition, rule));
        }
    }

    fn parse_named(&mut self) -> Result<()> {
        let rule = self.schema.required_rule();
        let all_names = self.schema.named_keys();
        let parsed = &mut self.parsed;
        for (key, definition) in self.schema.named() {
            let window = pick_named(&self.tokens, key, &all_names)?;
            let value = window.last().cloned().unwrap_or_default();
            parsed.insert(key.clone(), resolve(key, &value, definition, rule));
        }
        Ok(())
    }

    fn parse_prompts(&mut self) -> Result<()> {
        let rule = self.schema.required_rule();
        let parsed = &mut self.parsed;
        for (key, prompt) in self.schema.prompts() {
            let answer = prompt_line(&prompt.question, prompt.option.required)?;
            let mut resolved = resolve(key, &answer, &prompt.option, rule);
            resolved.question = Some(prompt.question.clone());
            parsed.insert(key.clone(), resolved);
        }
        if !self.schema.prompts().is_empty() {
            println!();
        }
        Ok(())
    }

    fn parse_selects(&mut self) -> Result<()> {
        let rule = self.schema.required_rule();
        let parsed = &mut self.parsed;
        for (key, choice) in self.schema.selects() {
            let mut session = SelectorSession::new(&choice.question, &choice.choices);
            match session.run() {
                Ok(answer) => {
                    let mut resolved = resolve(key, &answer, &choice.option, rule);
                    resolved.question = Some(choice.question.clone());
                    parsed.insert(key.clone(), resolved);
                    println!();
                }
                Err(error) => {
                    // The key still gets a result before the error surfaces,
                    // so the map stays uniform for the caller.
                    parsed.insert(
                        key.clone(),
                        ResolvedOption {
                            value: String::new(),
                            validation_msg: if choice.option.required {
                                format!("Options \"{key}\" is required")
                            } else {
                                String::new()
                            },
                            description: choice.option.description.clone(),
                            question: Some(choice.question.clone()),
                        },
                    );
                    return Err(error);
                }
            }
        }
        Ok(())
    }
}
