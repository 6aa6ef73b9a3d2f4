use super::error::FormError;
use super::locator::{find_question_recursive, find_question_set};
use super::rewriter::{modify_question_ids, modify_question_set_ids};
use super::types::{ButtonAction, Question, QuestionSet, Schema};

/// Clone the set an "add section" button points at.
///
/// `question_set_id` names the set holding the button (by convention `add-<template>`);
/// the button's `input.panelId` names the template set to copy.
pub fn duplicate_question_set(
    question_set_id: &str,
    schema: &Schema,
    suffix: &str,
) -> Result<QuestionSet, FormError> {
    let template_id = template_set_id(question_set_id, schema)?;
    let template = find_question_set(template_id, schema)
        .ok_or_else(|| FormError::QuestionSetNotFound(template_id.to_string()))?;

    tracing::debug!(
        "Duplicating question set '{}' with suffix '{}'",
        template.question_set_id,
        suffix
    );
    Ok(modify_question_set_ids(template, suffix))
}

/// Clone the listed questions of one set, found at any depth of its tree.
///
/// Ids that cannot be resolved are skipped. A non-empty `separator_text` is
/// prepended to the first cloned question only.
pub fn duplicate_questions(
    question_set_id: &str,
    question_ids: &[String],
    separator_text: Option<&str>,
    schema: &Schema,
    suffix: &str,
) -> Result<Vec<Question>, FormError> {
    let question_set = find_question_set(question_set_id, schema)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;

    let mut originals: Vec<Question> = Vec::with_capacity(question_ids.len());
    for question_id in question_ids {
        match find_question_recursive(&question_set.questions, question_id) {
            Some(question) => originals.push(question.clone()),
            None => tracing::debug!(
                "Question '{}' not found in set '{}', not duplicated",
                question_id,
                question_set_id
            ),
        }
    }

    if originals.is_empty() {
        return Err(FormError::mismatch(
            question_set_id,
            "none of the questions to duplicate exist in the set",
        ));
    }

    if let Some(separator) = separator_text.filter(|s| !s.is_empty()) {
        originals[0] = insert_question_separator(&originals[0], separator);
    }

    Ok(modify_question_ids(question_set_id, &originals, suffix))
}

/// Copy of `question` with `"\n<separator>\n\n"` in front of its text.
pub fn insert_question_separator(question: &Question, separator_text: &str) -> Question {
    Question {
        question: format!("\n{}\n\n{}", separator_text, question.question),
        ..question.clone()
    }
}

/// `input.panelId` of the add-section button inside `question_set_id`.
pub(crate) fn template_set_id<'a>(question_set_id: &str, schema: &'a Schema) -> Result<&'a str, FormError> {
    let button_set = find_question_set(question_set_id, schema)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;

    button_set
        .questions
        .iter()
        .filter(|q| q.action() == Some(ButtonAction::AddRepeatableSection))
        .find_map(|q| q.panel_id())
        .ok_or_else(|| FormError::mismatch(question_set_id, "add-section button has no input.panelId"))
}
