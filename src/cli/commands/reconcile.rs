use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::files::{load_application, load_schema, to_json_string, write_json};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::services::DynamicFormService;

#[derive(Args)]
pub struct ReconcileArgs {
    #[arg(help = "Source application JSON file (with questionAnswers)")]
    pub application: PathBuf,
    #[arg(help = "Target schema JSON file")]
    pub schema: PathBuf,
    #[arg(long, short, help = "Write the resulting schema here")]
    pub output: Option<PathBuf>,
}

pub fn handle(args: ReconcileArgs, service: &DynamicFormService, output_format: OutputFormat) -> anyhow::Result<()> {
    let application = load_application(&args.application)?;
    let schema = load_schema(&args.schema)?;

    let report = service.copy_user_repeated_sections(&application, &schema);

    for skipped in &report.skipped {
        output_error(
            &output_format,
            &format!("'{}' not carried over: {}", skipped.question_id, skipped.reason),
            Some(skipped.code),
        )?;
    }

    match args.output {
        Some(path) => {
            write_json(&path, &report.schema)?;
            output_success(
                &output_format,
                &format!(
                    "{} repeated groups materialized, schema written to {}",
                    report.materialized.len(),
                    path.display()
                ),
                Some(json!({ "materialized": report.materialized, "skipped": report.skipped })),
            )
        }
        None => {
            println!(
                "{}",
                to_json_string(&json!({
                    "schema": report.schema,
                    "materialized": report.materialized,
                    "skipped": report.skipped,
                }))?
            );
            Ok(())
        }
    }
}
