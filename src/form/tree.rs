//! Depth-first traversal over question lists and their conditional branches.
//!
//! Every operation that walks the question tree goes through these helpers so
//! the descent into `input.options[].conditionalQuestions` exists once.

use super::types::Question;

/// Find a question anywhere under `questions`.
pub fn find<'a>(questions: &'a [Question], question_id: &str) -> Option<&'a Question> {
    find_by(questions, &|q| q.question_id == question_id)
}

/// First question, depth-first, matching `predicate`.
pub fn find_by<'a>(questions: &'a [Question], predicate: &dyn Fn(&Question) -> bool) -> Option<&'a Question> {
    for question in questions {
        if predicate(question) {
            return Some(question);
        }
        for branch in question.branches() {
            if let Some(found) = find_by(branch, predicate) {
                return Some(found);
            }
        }
    }
    None
}

/// Locate the list that directly contains `question_id`, and its position there.
pub fn locate_mut<'a>(
    questions: &'a mut Vec<Question>,
    question_id: &str,
) -> Option<(&'a mut Vec<Question>, usize)> {
    if let Some(position) = questions.iter().position(|q| q.question_id == question_id) {
        return Some((questions, position));
    }
    for question in questions.iter_mut() {
        for branch in question.branches_mut() {
            if let Some(found) = locate_mut(branch, question_id) {
                return Some(found);
            }
        }
    }
    None
}

/// Call `f` on every question, parents before their conditional children.
pub fn visit<'a>(questions: &'a [Question], f: &mut dyn FnMut(&'a Question)) {
    for question in questions {
        f(question);
        for branch in question.branches() {
            visit(branch, f);
        }
    }
}

/// Mutable counterpart of [`visit`].
pub fn visit_mut(questions: &mut [Question], f: &mut dyn FnMut(&mut Question)) {
    for question in questions.iter_mut() {
        f(question);
        for branch in question.branches_mut() {
            visit_mut(branch, f);
        }
    }
}
