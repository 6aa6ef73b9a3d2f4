use serde::{Deserialize, Serialize};

use crate::form::answers::{is_repeated_question_id, remove_question_answers, remove_question_set_answers};
use crate::form::cloner::{duplicate_question_set, duplicate_questions};
use crate::form::locator::{find_question_recursive, find_question_set};
use crate::form::reconciler::{copy_user_repeated_sections, ReconcileReport};
use crate::form::remover::{remove_question_references, remove_question_set_references};
use crate::form::splicer::{insert_question_set, insert_questions};
use crate::form::suffix::{generate_suffix, suffix_in_use};
use crate::form::types::{Answers, Application, ButtonAction, Question, Schema};
use crate::form::validate::validate_schema;
use crate::form::FormError;
use crate::types::Operation;

/// Result of one user-facing schema action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaChange {
    pub operation: Operation,
    pub schema: Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// False when a recoverable error left the inputs unchanged
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub pages: usize,
    pub question_panels: usize,
    pub question_sets: usize,
    pub questions: usize,
    pub repeatable_sections: Vec<String>,
    pub violations: Vec<String>,
    pub checksum: String,
}

/// Stateless entry point used by the application workflow.
///
/// Every method works on copies; the schema passed in is never modified.
#[derive(Debug, Clone)]
pub struct DynamicFormService {
    strict: bool,
    suffix_max_attempts: u32,
}

impl Default for DynamicFormService {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicFormService {
    /// Service configured from the global config
    pub fn new() -> Self {
        let forms = &crate::config::config().forms;
        Self::with_options(forms.strict_references, forms.suffix_max_attempts)
    }

    pub fn with_options(strict: bool, suffix_max_attempts: u32) -> Self {
        Self {
            strict,
            suffix_max_attempts,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Clone the template behind the add-section button set `question_set_id`
    /// under a freshly generated suffix.
    pub fn add_repeatable_section(&self, schema: &Schema, question_set_id: &str) -> Result<SchemaChange, FormError> {
        let suffix = generate_suffix(schema, self.suffix_max_attempts)?;
        self.add_repeatable_section_with_suffix(schema, question_set_id, &suffix)
    }

    pub fn add_repeatable_section_with_suffix(
        &self,
        schema: &Schema,
        question_set_id: &str,
        suffix: &str,
    ) -> Result<SchemaChange, FormError> {
        check_suffix(schema, suffix)?;
        let result = duplicate_question_set(question_set_id, schema, suffix)
            .and_then(|new_set| insert_question_set(question_set_id, new_set, schema));
        self.settle(Operation::AddSection, result, schema, None, Some(suffix))
    }

    /// Drop a cloned section and blank its answers.
    pub fn remove_repeatable_section(
        &self,
        schema: &Schema,
        answers: &Answers,
        question_set_id: &str,
        question_id: &str,
    ) -> Result<SchemaChange, FormError> {
        let result = remove_question_set_references(question_set_id, question_id, schema);
        let answers_after = if result.is_ok() {
            remove_question_set_answers(question_id, answers)
        } else {
            answers.clone()
        };
        self.settle(Operation::RemoveSection, result, schema, Some(answers_after), None)
    }

    /// Clone the questions an add-questions button lists, just above the button.
    pub fn add_repeatable_questions(
        &self,
        schema: &Schema,
        question_set_id: &str,
        button_question_id: &str,
    ) -> Result<SchemaChange, FormError> {
        let suffix = generate_suffix(schema, self.suffix_max_attempts)?;
        self.add_repeatable_questions_with_suffix(schema, question_set_id, button_question_id, &suffix)
    }

    pub fn add_repeatable_questions_with_suffix(
        &self,
        schema: &Schema,
        question_set_id: &str,
        button_question_id: &str,
        suffix: &str,
    ) -> Result<SchemaChange, FormError> {
        check_suffix(schema, suffix)?;
        let result = find_button(schema, question_set_id, button_question_id, ButtonAction::AddRepeatableQuestions)
            .and_then(|button| {
                let input = button.input.as_ref();
                let question_ids = listed_question_ids(button)?;
                let duplicates = duplicate_questions(
                    question_set_id,
                    question_ids,
                    input.and_then(|i| i.separator_text.as_deref()),
                    schema,
                    suffix,
                )?;
                insert_questions(question_set_id, button_question_id, duplicates, schema)
            });
        self.settle(Operation::AddQuestions, result, schema, None, Some(suffix))
    }

    /// Remove the questions a remove-questions button lists and delete their answers.
    pub fn remove_repeatable_questions(
        &self,
        schema: &Schema,
        answers: &Answers,
        question_set_id: &str,
        button_question_id: &str,
    ) -> Result<SchemaChange, FormError> {
        let listed = find_button(schema, question_set_id, button_question_id, ButtonAction::RemoveRepeatableQuestions)
            .and_then(|button| listed_question_ids(button).map(<[String]>::to_vec));

        let (result, answers_after) = match listed {
            Ok(question_ids) => (
                remove_question_references(question_set_id, &question_ids, schema),
                remove_question_answers(&question_ids, answers),
            ),
            Err(err) => (Err(err), answers.clone()),
        };
        self.settle(Operation::RemoveQuestions, result, schema, Some(answers_after), None)
    }

    /// Give `schema` a slot for every repeated group answered in `application`.
    pub fn copy_user_repeated_sections(&self, application: &Application, schema: &Schema) -> ReconcileReport {
        let report = copy_user_repeated_sections(application, schema);
        for skipped in &report.skipped {
            tracing::warn!(
                "{}: answer '{}' has no slot in the target schema: {}",
                Operation::Reconcile,
                skipped.question_id,
                skipped.reason
            );
        }
        tracing::info!(
            "{}: {} repeated groups materialized, {} skipped",
            Operation::Reconcile,
            report.materialized.len(),
            report.skipped.len()
        );
        report
    }

    pub fn describe(&self, schema: &Schema) -> Result<SchemaSummary, FormError> {
        let canonical = serde_json::to_string(schema)?;
        let repeatable_sections = schema
            .question_sets
            .iter()
            .filter(|qs| {
                qs.questions
                    .iter()
                    .any(|q| q.action() == Some(ButtonAction::AddRepeatableSection))
            })
            .map(|qs| qs.question_set_id.clone())
            .collect();

        Ok(SchemaSummary {
            pages: schema.pages.len(),
            question_panels: schema.question_panels.len(),
            question_sets: schema.question_sets.len(),
            questions: schema.question_ids().len(),
            repeatable_sections,
            violations: validate_schema(schema).iter().map(ToString::to_string).collect(),
            checksum: generate_json_checksum(&canonical),
        })
    }

    /// Apply the strict / lenient policy to an engine result.
    fn settle(
        &self,
        operation: Operation,
        result: Result<Schema, FormError>,
        original: &Schema,
        answers: Option<Answers>,
        suffix: Option<&str>,
    ) -> Result<SchemaChange, FormError> {
        match result {
            Ok(schema) => {
                tracing::info!("{} applied{}", operation, suffix.map(|s| format!(" with suffix '{}'", s)).unwrap_or_default());
                if crate::config::config().forms.debug_logging {
                    tracing::debug!(
                        "{}: question sets {} -> {}",
                        operation,
                        original.question_sets.len(),
                        schema.question_sets.len()
                    );
                }
                Ok(SchemaChange {
                    operation,
                    schema,
                    answers,
                    suffix: suffix.map(str::to_string),
                    applied: true,
                })
            }
            Err(err) if err.is_recoverable() && !self.strict => {
                tracing::warn!("{} left schema unchanged: {}", operation, err);
                Ok(SchemaChange {
                    operation,
                    schema: original.clone(),
                    answers,
                    suffix: None,
                    applied: false,
                })
            }
            Err(err) => Err(err),
        }
    }
}

fn check_suffix(schema: &Schema, suffix: &str) -> Result<(), FormError> {
    if !is_repeated_question_id(&format!("_{}", suffix)) || suffix.len() != 5 {
        return Err(FormError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: "expected five ASCII letters or digits".to_string(),
        });
    }
    if suffix_in_use(schema, suffix) {
        return Err(FormError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: "already used in this schema".to_string(),
        });
    }
    Ok(())
}

fn find_button<'a>(
    schema: &'a Schema,
    question_set_id: &str,
    button_question_id: &str,
    expected: ButtonAction,
) -> Result<&'a Question, FormError> {
    let question_set = find_question_set(question_set_id, schema)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;
    let button = find_question_recursive(&question_set.questions, button_question_id)
        .ok_or_else(|| FormError::QuestionNotFound(button_question_id.to_string()))?;
    if button.action() != Some(expected) {
        return Err(FormError::mismatch(
            button_question_id,
            format!("expected a {} button", expected.as_str()),
        ));
    }
    Ok(button)
}

fn listed_question_ids(button: &Question) -> Result<&[String], FormError> {
    button
        .input
        .as_ref()
        .and_then(|i| i.question_ids.as_deref())
        .ok_or_else(|| FormError::mismatch(&button.question_id, "button has no input.questionIds"))
}

fn generate_json_checksum(json_content: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(json_content.as_bytes());
    format!("{:x}", hasher.finalize())
}
