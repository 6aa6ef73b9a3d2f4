use super::tree;
use super::types::{ButtonAction, Input, Question, QuestionSet};

const REMOVE_BUTTON_TEXT: &str = "Remove";
const REMOVE_BUTTON_CLASS: &str = "btn btn-light";

/// `<lowercased id>_<suffix>`
pub fn suffixed_id(question_id: &str, suffix: &str) -> String {
    format!("{}_{}", question_id.to_lowercase(), suffix)
}

/// Id of the synthetic remove button appended to a clone.
pub fn remove_button_id(question_set_id: &str, suffix: &str) -> String {
    format!("remove{}_{}", question_set_id, suffix)
}

/// Copy a whole question set, rewriting every question id (nested ones included)
/// and appending a `removeRepeatableSection` button that points at the new set.
///
/// The suffix must not already be in use in the target schema.
pub fn modify_question_set_ids(question_set: &QuestionSet, suffix: &str) -> QuestionSet {
    let new_set_id = format!("{}_{}", question_set.question_set_id, suffix);

    let mut questions = rewrite_questions(&question_set.questions, suffix);

    let mut input = remove_button_input(ButtonAction::RemoveRepeatableSection);
    input.panel_id = Some(new_set_id.clone());
    questions.push(
        Question::new(remove_button_id(&question_set.question_set_id, suffix), "").with_input(input),
    );

    QuestionSet {
        question_set_id: new_set_id,
        questions,
        ..question_set.clone()
    }
}

/// Copy a list of questions with rewritten ids and append a
/// `removeRepeatableQuestions` button listing every id of the copy.
pub fn modify_question_ids(question_set_id: &str, questions: &[Question], suffix: &str) -> Vec<Question> {
    let mut modified = rewrite_questions(questions, suffix);

    let button_id = remove_button_id(question_set_id, suffix);
    let mut question_ids = Vec::new();
    tree::visit(&modified, &mut |q| question_ids.push(q.question_id.clone()));
    question_ids.push(button_id.clone());

    let mut input = remove_button_input(ButtonAction::RemoveRepeatableQuestions);
    input.panel_id = Some(question_set_id.to_string());
    input.question_ids = Some(question_ids);
    modified.push(Question::new(button_id, "").with_input(input));

    modified
}

/// Rewrite the ids of every conditional question below `questions`, to any depth.
pub fn modify_nested_question_ids(questions: &mut [Question], suffix: &str) {
    for question in questions.iter_mut() {
        for branch in question.branches_mut() {
            tree::visit_mut(branch, &mut |q| {
                if !q.question_id.is_empty() {
                    q.question_id = suffixed_id(&q.question_id, suffix);
                }
            });
        }
    }
}

fn rewrite_questions(questions: &[Question], suffix: &str) -> Vec<Question> {
    let mut copy = questions.to_vec();
    for question in copy.iter_mut() {
        if !question.question_id.is_empty() {
            question.question_id = suffixed_id(&question.question_id, suffix);
        }
    }
    modify_nested_question_ids(&mut copy, suffix);
    copy
}

fn remove_button_input(action: ButtonAction) -> Input {
    let mut input = Input::button(action);
    input.text = Some(REMOVE_BUTTON_TEXT.to_string());
    input.class = Some(REMOVE_BUTTON_CLASS.to_string());
    input
}
