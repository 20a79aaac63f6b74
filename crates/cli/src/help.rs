use itertools::Itertools;

use askopt_core::schema::CommandSchema;

/// Renders the generated option summary for the reserved `help` token.
///
/// One section per non-empty group, each a small aligned table of key,
/// requiredness and description; select questions also list their choices.
#[must_use]
pub fn render_help(schema: &CommandSchema) -> String {
    let mut out = String::new();

    push_section(
        &mut out,
        "Positional options (assigned by position):",
        schema
            .positional()
            .iter()
            .map(|(key, definition)| {
                (key.clone(), definition.required, definition.description.clone())
            })
            .collect(),
    );

    push_section(
        &mut out,
        "Named options (key=value):",
        schema
            .named()
            .iter()
            .map(|(key, definition)| {
                (key.clone(), definition.required, definition.description.clone())
            })
            .collect(),
    );

    push_section(
        &mut out,
        "Free-text questions:",
        schema
            .prompts()
            .iter()
            .map(|(key, prompt)| {
                (
                    key.clone(),
                    prompt.option.required,
                    describe(&prompt.option.description, &prompt.question),
                )
            })
            .collect(),
    );

    push_section(
        &mut out,
        "Choice questions:",
        schema
            .selects()
            .iter()
            .map(|(key, choice)| {
                let description = format!(
                    "{} [choices: {}]",
                    describe(&choice.option.description, &choice.question),
                    choice.choices.iter().join(", ")
                );
                (key.clone(), choice.option.required, description)
            })
            .collect(),
    );

    out
}

/// Falls back to the question text when an option has no description.
fn describe(description: &str, question: &str) -> String {
    if description.is_empty() {
        question.to_string()
    } else {
        description.to_string()
    }
}

fn push_section(out: &mut String, title: &str, rows: Vec<(String, bool, String)>) {
    if rows.is_empty() {
        return;
    }

    let width = rows.iter().map(|(key, ..)| key.len()).max().unwrap_or(0);

    out.push('\n');
    out.push_str(title);
    out.push_str("\n\n");
    for (key, required, description) in rows {
        let required = if required { "required" } else { "optional" };
        out.push_str(&format!("  {key:<width$}  {required}  {description}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askopt_core::option_definitions::{ChoiceDefinition, OptionDefinition, PromptDefinition};
    use indexmap::IndexMap;

    fn sample_schema() -> CommandSchema {
        let positional = IndexMap::from([(
            "target".to_string(),
            OptionDefinition {
                description: "build target".to_string(),
                required: true,
                ..Default::default()
            },
        )]);
        let named = IndexMap::from([(
            "--region".to_string(),
            OptionDefinition {
                description: "deploy region".to_string(),
                ..Default::default()
            },
        )]);
        let prompts = IndexMap::from([(
            "greeting".to_string(),
            PromptDefinition {
                option: OptionDefinition::default(),
                question: "what should we print?".to_string(),
            },
        )]);
        let selects = IndexMap::from([(
            "color".to_string(),
            ChoiceDefinition {
                option: OptionDefinition::default(),
                question: "which color?".to_string(),
                choices: vec!["red".to_string(), "green".to_string()],
            },
        )]);
        CommandSchema::new(positional, named, prompts, selects).unwrap()
    }

    #[test]
    fn test_help_lists_every_group() {
        let help = render_help(&sample_schema());

        assert!(help.contains("Positional options"));
        assert!(help.contains("target"));
        assert!(help.contains("required"));
        assert!(help.contains("Named options"));
        assert!(help.contains("--region"));
        assert!(help.contains("Free-text questions"));
        assert!(help.contains("what should we print?"));
        assert!(help.contains("Choice questions"));
        assert!(help.contains("[choices: red, green]"));
    }

    #[test]
    fn test_empty_groups_render_no_section() {
        let named = IndexMap::from([("--only".to_string(), OptionDefinition::default())]);
        let schema = CommandSchema::new(
            IndexMap::new(),
            named,
            IndexMap::new(),
            IndexMap::new(),
        )
        .unwrap();
        let help = render_help(&schema);

        assert!(help.contains("Named options"));
        assert!(!help.contains("Positional options"));
        assert!(!help.contains("Choice questions"));
    }
}
