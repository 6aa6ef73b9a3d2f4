use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::form::types::{Answers, Application, Schema};
use crate::form::{validate_schema, FormError};

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} file {} is not valid", what, path.display()))
}

/// Read a schema, validating it first when the config asks for that.
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let schema: Schema = read_json(path, "schema")?;

    if crate::config::config().cli.validate_on_load {
        let violations = validate_schema(&schema);
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(FormError::InvalidSchema(details.join("; ")).into());
        }
    }

    Ok(schema)
}

/// Read answers from either a bare `{ questionId: value }` map or an
/// application document carrying `questionAnswers`.
pub fn load_answers(path: &Path) -> anyhow::Result<Answers> {
    let value: serde_json::Value = read_json(path, "answers")?;
    let answers = match value.get("questionAnswers") {
        Some(nested) => nested.clone(),
        None => value,
    };
    match answers {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("answers file {} must hold a JSON object", path.display()),
    }
}

pub fn load_application(path: &Path) -> anyhow::Result<Application> {
    read_json(path, "application")
}

pub fn to_json_string<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let content = if crate::config::config().cli.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(content)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let content = to_json_string(value)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
