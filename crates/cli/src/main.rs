use std::process::ExitCode;

use indexmap::IndexMap;
use log::debug;

use askopt_cli::parser::{CommandParser, ParseStatus};
use askopt_core::error::Result;
use askopt_core::option_definitions::{
    ChoiceDefinition, OptionDefinition, PromptDefinition, Validity,
};
use askopt_core::schema::CommandSchema;

/// Demo schema exercising all four groups. Try:
///
/// ```bash
/// askopt help
/// askopt deploy --env=prod --region = EU-WEST-1
/// ```
fn build_schema() -> Result<CommandSchema> {
    let positional = IndexMap::from([(
        "action".to_string(),
        OptionDefinition {
            description: "what to do (e.g. deploy)".to_string(),
            required: true,
            ..Default::default()
        },
    )]);

    let named = IndexMap::from([
        (
            "--env".to_string(),
            OptionDefinition {
                description: "target environment".to_string(),
                required: true,
                validator: Some(Box::new(|value: &str| {
                    if value == "dev" || value == "prod" {
                        Validity::Valid
                    } else {
                        Validity::Invalid(Some("expected dev or prod".to_string()))
                    }
                })),
                ..Default::default()
            },
        ),
        (
            "--region".to_string(),
            OptionDefinition {
                description: "deploy region".to_string(),
                transformer: Some(Box::new(|value: String| value.to_lowercase())),
                ..Default::default()
            },
        ),
    ]);

    let prompts = IndexMap::from([(
        "release-note".to_string(),
        PromptDefinition {
            option: OptionDefinition {
                description: "free-text note attached to the release".to_string(),
                ..Default::default()
            },
            question: "Any note for this release?".to_string(),
        },
    )]);

    let selects = IndexMap::from([(
        "rollout".to_string(),
        ChoiceDefinition {
            option: OptionDefinition {
                description: "rollout strategy".to_string(),
                ..Default::default()
            },
            question: "How should this roll out?".to_string(),
            choices: vec![
                "all-at-once".to_string(),
                "canary".to_string(),
                "blue-green".to_string(),
            ],
        },
    )]);

    CommandSchema::new(positional, named, prompts, selects)
}

fn execute() -> Result<()> {
    let schema = build_schema()?;
    let mut parser = CommandParser::new(schema)?;

    if parser.parse()? == ParseStatus::HelpPrinted {
        return Ok(());
    }

    debug!("all groups resolved");
    println!("Resolved options:");
    for (key, resolved) in parser.options() {
        println!("  {key} = {resolved}");
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
