use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::files::{load_schema, to_json_string};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::form::locator::find_question_recursive;
use crate::form::validate_schema;
use crate::services::DynamicFormService;

#[derive(Subcommand)]
pub enum SchemaCommands {
    #[command(about = "Check id uniqueness and panel references")]
    Validate {
        #[arg(help = "Schema JSON file")]
        schema: PathBuf,
    },

    #[command(about = "Summarize a schema and print its checksum")]
    Describe {
        #[arg(help = "Schema JSON file")]
        schema: PathBuf,
    },

    #[command(about = "Find a question at any depth")]
    Find {
        #[arg(help = "Schema JSON file")]
        schema: PathBuf,
        #[arg(help = "Question id")]
        question_id: String,
    },
}

pub fn handle(cmd: SchemaCommands, service: &DynamicFormService, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SchemaCommands::Validate { schema } => {
            let content = std::fs::read_to_string(&schema)?;
            let parsed = serde_json::from_str(&content)?;
            let violations = validate_schema(&parsed);
            if violations.is_empty() {
                return output_success(&output_format, &format!("{} is consistent", schema.display()), None);
            }
            for violation in &violations {
                output_error(&output_format, &violation.to_string(), Some("SCHEMA_VIOLATION"))?;
            }
            anyhow::bail!("{} violations found in {}", violations.len(), schema.display())
        }
        SchemaCommands::Describe { schema } => {
            let parsed = load_schema(&schema)?;
            let summary = service.describe(&parsed)?;
            match output_format {
                OutputFormat::Json => println!("{}", to_json_string(&summary)?),
                OutputFormat::Text => {
                    println!("Pages: {}", summary.pages);
                    println!("Question panels: {}", summary.question_panels);
                    println!("Question sets: {}", summary.question_sets);
                    println!("Questions: {}", summary.questions);
                    if !summary.repeatable_sections.is_empty() {
                        println!("Repeatable sections: {}", summary.repeatable_sections.join(", "));
                    }
                    println!("Checksum: {}", summary.checksum);
                }
            }
            Ok(())
        }
        SchemaCommands::Find { schema, question_id } => {
            let parsed = load_schema(&schema)?;
            let found = parsed.question_sets.iter().find_map(|qs| {
                find_question_recursive(&qs.questions, &question_id).map(|q| (qs.question_set_id.as_str(), q))
            });
            match found {
                Some((question_set_id, question)) => output_success(
                    &output_format,
                    &format!("'{}' found in question set '{}'", question_id, question_set_id),
                    Some(json!({ "questionSetId": question_set_id, "question": question })),
                ),
                None => {
                    output_error(&output_format, &format!("'{}' not found", question_id), Some("QUESTION_NOT_FOUND"))?;
                    anyhow::bail!("question '{}' not found", question_id)
                }
            }
        }
    }
}
