use super::cloner::template_set_id;
use super::error::FormError;
use super::locator::{find_owning_panel, find_question_panel};
use super::tree;
use super::types::{Question, QuestionSet, QuestionSetRef, Schema};

/// Add a cloned set to the schema and reference it from the panel that owns
/// its template, just above the panel's last entry (the "add" button set).
///
/// `question_set_id` is the set holding the add-section button.
pub fn insert_question_set(
    question_set_id: &str,
    new_set: QuestionSet,
    schema: &Schema,
) -> Result<Schema, FormError> {
    let template_id = template_set_id(question_set_id, schema)?;
    let panel_id = find_question_panel(template_id, &schema.question_panels)
        .or_else(|| find_owning_panel(template_id, &schema.question_panels))
        .map(|p| p.panel_id.clone())
        .ok_or_else(|| FormError::PanelNotFound(template_id.to_string()))?;

    let mut updated = schema.clone();
    let reference = QuestionSetRef {
        index: None,
        question_set_id: new_set.question_set_id.clone(),
    };
    updated.question_sets.push(new_set);

    let panel = updated
        .question_panel_mut(&panel_id)
        .ok_or_else(|| FormError::PanelNotFound(panel_id.clone()))?;
    let position = panel.question_sets.len().saturating_sub(1);
    let index = panel.question_sets.get(position).and_then(|r| r.index);
    panel
        .question_sets
        .insert(position, QuestionSetRef { index, ..reference });

    tracing::debug!("Inserted question set reference into panel '{}' at {}", panel_id, position);
    Ok(updated)
}

/// Splice `new_questions` into the list that directly holds `anchor_question_id`,
/// immediately before the anchor.
pub fn insert_questions(
    question_set_id: &str,
    anchor_question_id: &str,
    new_questions: Vec<Question>,
    schema: &Schema,
) -> Result<Schema, FormError> {
    let mut updated = schema.clone();
    let question_set = updated
        .question_set_mut(question_set_id)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;

    let (parent, position) = tree::locate_mut(&mut question_set.questions, anchor_question_id)
        .ok_or_else(|| FormError::QuestionNotFound(anchor_question_id.to_string()))?;

    let count = new_questions.len();
    parent.splice(position..position, new_questions);

    tracing::debug!(
        "Inserted {} questions before '{}' in set '{}'",
        count,
        anchor_question_id,
        question_set_id
    );
    Ok(updated)
}
