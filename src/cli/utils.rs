use serde_json::{json, Value};
use std::path::Path;

use crate::cli::files::{to_json_string, write_json};
use crate::cli::OutputFormat;
use crate::services::SchemaChange;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(extra);
                }
            }

            println!("{}", to_json_string(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", to_json_string(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Write or print the result of a schema action.
///
/// With `output` the schema goes to that file (and answers to `answers_output`
/// when both exist); otherwise the whole change is printed as one JSON
/// document, carrying `applied`.
pub fn emit_change(
    output_format: &OutputFormat,
    change: &SchemaChange,
    output: Option<&Path>,
    answers_output: Option<&Path>,
) -> anyhow::Result<()> {
    if !change.applied && reports_not_applied_separately(output_format, output) {
        output_error(
            output_format,
            &format!("{} not applied; schema left unchanged", change.operation),
            Some("NOT_APPLIED"),
        )?;
    }

    let Some(path) = output else {
        println!("{}", to_json_string(change)?);
        return Ok(());
    };

    write_json(path, &change.schema)?;
    if let (Some(answers_path), Some(answers)) = (answers_output, change.answers.as_ref()) {
        write_json(answers_path, answers)?;
    }

    if change.applied {
        let mut message = format!("{} written to {}", change.operation, path.display());
        if let Some(suffix) = &change.suffix {
            message.push_str(&format!(" (suffix {})", suffix));
        }
        output_success(
            output_format,
            &message,
            Some(json!({ "operation": change.operation, "suffix": change.suffix })),
        )?;
    }
    Ok(())
}

/// A printed JSON change already carries `applied`; stdout holds one document.
fn reports_not_applied_separately(output_format: &OutputFormat, output: Option<&Path>) -> bool {
    output.is_some() || matches!(output_format, OutputFormat::Text)
}
