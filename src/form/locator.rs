use super::tree;
use super::types::{Question, QuestionPanel, QuestionSet, Schema};

/// Question set by id. Empty ids never match.
pub fn find_question_set<'a>(question_set_id: &str, schema: &'a Schema) -> Option<&'a QuestionSet> {
    if question_set_id.is_empty() {
        return None;
    }
    schema
        .question_sets
        .iter()
        .find(|qs| qs.question_set_id == question_set_id)
}

pub fn find_question_panel<'a>(
    panel_id: &str,
    question_panels: &'a [QuestionPanel],
) -> Option<&'a QuestionPanel> {
    if panel_id.is_empty() {
        return None;
    }
    question_panels.iter().find(|p| p.panel_id == panel_id)
}

/// Direct questions of one set only; conditional branches are not searched.
pub fn find_question<'a>(question_id: &str, question_set: &'a QuestionSet) -> Option<&'a Question> {
    if question_id.is_empty() {
        return None;
    }
    question_set
        .questions
        .iter()
        .find(|q| q.question_id == question_id)
}

/// Depth-first search through every conditional branch.
pub fn find_question_recursive<'a>(questions: &'a [Question], question_id: &str) -> Option<&'a Question> {
    if question_id.is_empty() {
        return None;
    }
    tree::find(questions, question_id)
}

/// First question set whose tree contains `question_id` at any depth.
pub fn find_question_set_containing<'a>(question_id: &str, schema: &'a Schema) -> Option<&'a QuestionSet> {
    schema
        .question_sets
        .iter()
        .find(|qs| find_question_recursive(&qs.questions, question_id).is_some())
}

/// Panel whose `questionSets` list references `question_set_id`.
pub fn find_owning_panel<'a>(
    question_set_id: &str,
    question_panels: &'a [QuestionPanel],
) -> Option<&'a QuestionPanel> {
    question_panels.iter().find(|p| p.references(question_set_id))
}
