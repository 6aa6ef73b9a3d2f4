use super::error::FormError;
use super::locator::{find_question, find_question_set};
use super::tree;
use super::types::Schema;

/// Drop a cloned set from `questionSets` and from the panel that references it.
///
/// `question_id` is the remove-section button inside `question_set_id`; its
/// `input.panelId` names the set to drop.
pub fn remove_question_set_references(
    question_set_id: &str,
    question_id: &str,
    schema: &Schema,
) -> Result<Schema, FormError> {
    let question_set = find_question_set(question_set_id, schema)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;
    let question = find_question(question_id, question_set)
        .ok_or_else(|| FormError::QuestionNotFound(question_id.to_string()))?;
    let target = question
        .panel_id()
        .ok_or_else(|| FormError::mismatch(question_id, "remove button has no input.panelId"))?
        .to_string();

    let mut updated = schema.clone();
    updated.question_sets.retain(|qs| qs.question_set_id != target);
    for panel in updated.question_panels.iter_mut() {
        panel.question_sets.retain(|r| r.question_set_id != target);
    }

    tracing::debug!("Removed question set '{}' and its panel references", target);
    Ok(updated)
}

/// Remove each listed question from wherever it sits in the set's tree.
/// Ids that are already gone are skipped.
pub fn remove_question_references(
    question_set_id: &str,
    question_ids: &[String],
    schema: &Schema,
) -> Result<Schema, FormError> {
    if question_ids.is_empty() {
        return Ok(schema.clone());
    }

    let mut updated = schema.clone();
    let question_set = updated
        .question_set_mut(question_set_id)
        .ok_or_else(|| FormError::QuestionSetNotFound(question_set_id.to_string()))?;

    for question_id in question_ids {
        match tree::locate_mut(&mut question_set.questions, question_id) {
            Some((parent, position)) => {
                parent.remove(position);
            }
            None => tracing::debug!("Question '{}' already absent from '{}'", question_id, question_set_id),
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::types::{
        ButtonAction, Input, InputOption, Question, QuestionPanel, QuestionSet, QuestionSetRef, RADIO_OPTIONS_INPUT,
    };

    fn schema() -> Schema {
        let mut remove = Input::button(ButtonAction::RemoveRepeatableSection);
        remove.panel_id = Some("funder_abcde".into());
        let parent = Question::new("hasFunder", "?").with_input(Input::new(RADIO_OPTIONS_INPUT).with_options(vec![
            InputOption::new("Yes").with_conditional(vec![
                Question::new("fundername_q1w2e", "Name"),
                Question::new("add-funder", ""),
            ]),
        ]));

        Schema {
            question_panels: vec![QuestionPanel {
                panel_id: "funder".into(),
                question_sets: ["funder", "funder_abcde", "add-funder"]
                    .iter()
                    .map(|id| QuestionSetRef { index: Some(1), question_set_id: id.to_string() })
                    .collect(),
                ..Default::default()
            }],
            question_sets: vec![
                QuestionSet::new("funder", vec![parent]),
                QuestionSet::new(
                    "funder_abcde",
                    vec![
                        Question::new("fundername_abcde", "Name"),
                        Question::new("removefunder_abcde", "").with_input(remove),
                    ],
                ),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn removes_set_and_panel_reference() {
        let s = schema();
        let updated = remove_question_set_references("funder_abcde", "removefunder_abcde", &s).unwrap();
        assert_eq!(updated.question_sets.len(), 1);
        let refs: Vec<_> = updated.question_panels[0].question_sets.iter().map(|r| r.question_set_id.as_str()).collect();
        assert_eq!(refs, vec!["funder", "add-funder"]);
    }

    #[test]
    fn removal_is_idempotent() {
        let s = schema();
        let once = remove_question_set_references("funder_abcde", "removefunder_abcde", &s).unwrap();
        let err = remove_question_set_references("funder_abcde", "removefunder_abcde", &once).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn unresolvable_button_is_not_found() {
        let err = remove_question_set_references("funder_abcde", "nope", &schema()).unwrap_err();
        assert!(matches!(err, FormError::QuestionNotFound(_)));
    }

    #[test]
    fn removes_nested_questions_and_skips_absent() {
        let s = schema();
        let ids = vec!["fundername_q1w2e".to_string(), "never-there".to_string()];
        let updated = remove_question_references("funder", &ids, &s).unwrap();
        assert!(tree::find(&updated.question_sets[0].questions, "fundername_q1w2e").is_none());
        assert!(tree::find(&updated.question_sets[0].questions, "add-funder").is_some());
    }

    #[test]
    fn empty_removal_list_is_a_no_op() {
        let s = schema();
        assert_eq!(remove_question_references("missing-set", &[], &s).unwrap(), s);
    }
}
