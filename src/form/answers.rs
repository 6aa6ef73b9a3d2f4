use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::Answers;

/// Answers to cloned questions end in `_<5 alphanumerics>`.
static REPEATED_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_[a-zA-Z0-9]{5}$").expect("repeated id pattern must compile"));

pub const SUFFIX_LENGTH: usize = 5;

pub fn is_repeated_question_id(question_id: &str) -> bool {
    REPEATED_ID.is_match(question_id)
}

/// `("applicantname", "Ab1c2")` for `"applicantname_Ab1c2"`.
pub fn split_repeated_id(question_id: &str) -> Option<(&str, &str)> {
    if !is_repeated_question_id(question_id) {
        return None;
    }
    question_id.rsplit_once('_')
}

/// Text after the last `_`, if any.
pub fn question_suffix(question_id: &str) -> Option<&str> {
    question_id
        .rsplit_once('_')
        .map(|(_, suffix)| suffix)
        .filter(|suffix| !suffix.is_empty())
}

/// Keys of `answers` that belong to a repeated group, in key order.
pub fn repeated_question_ids(answers: &Answers) -> Vec<&str> {
    answers
        .keys()
        .map(String::as_str)
        .filter(|key| is_repeated_question_id(key))
        .collect()
}

/// Blank (not delete) every answer belonging to the clone `question_id` came from.
/// Keys stay so later validation of the application still finds them.
pub fn remove_question_set_answers(question_id: &str, answers: &Answers) -> Answers {
    let mut updated = answers.clone();
    let Some(suffix) = question_suffix(question_id) else {
        tracing::debug!("Question '{}' carries no suffix, answers left as is", question_id);
        return updated;
    };

    let marker = format!("_{}", suffix);
    for (key, value) in updated.iter_mut() {
        if key.contains(&marker) {
            *value = Value::String(String::new());
        }
    }
    updated
}

/// Delete the listed answers outright.
pub fn remove_question_answers(question_ids: &[String], answers: &Answers) -> Answers {
    let mut updated = answers.clone();
    for question_id in question_ids {
        updated.remove(question_id);
    }
    updated
}
