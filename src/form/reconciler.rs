use serde::Serialize;
use std::collections::HashSet;

use super::answers::{repeated_question_ids, split_repeated_id};
use super::cloner::{duplicate_question_set, duplicate_questions};
use super::error::FormError;
use super::locator::{find_question_recursive, find_question_set};
use super::splicer::{insert_question_set, insert_questions};
use super::tree;
use super::types::{Application, QuestionSet, Schema};

/// Outcome of carrying an application's repeated groups into a schema.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub schema: Schema,
    /// Suffixes cloned into the schema by this run, in the order handled
    pub materialized: Vec<String>,
    pub skipped: Vec<SkippedGroup>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedGroup {
    pub question_id: String,
    pub suffix: String,
    pub code: &'static str,
    pub reason: String,
}

/// Make sure `schema` has a slot for every repeated-group answer in `application`.
///
/// Each distinct suffix is cloned at most once, using the same suffix so the
/// cloned ids match the carried-over answer keys. Groups already present in
/// `schema` are left alone, which makes a second run a no-op.
pub fn copy_user_repeated_sections(application: &Application, schema: &Schema) -> ReconcileReport {
    let mut report = ReconcileReport {
        schema: schema.clone(),
        materialized: Vec::new(),
        skipped: Vec::new(),
    };
    let mut handled: HashSet<String> = HashSet::new();

    for answer_id in repeated_question_ids(&application.question_answers) {
        let Some((base_id, suffix)) = split_repeated_id(answer_id) else {
            continue;
        };
        if handled.contains(suffix) {
            continue;
        }
        if contains_group(&report.schema, base_id, suffix) {
            handled.insert(suffix.to_string());
            continue;
        }

        match materialize(&report.schema, base_id, suffix) {
            Ok(updated) => {
                tracing::info!("Materialized repeated group '{}' for '{}'", suffix, base_id);
                report.schema = updated;
                report.materialized.push(suffix.to_string());
                handled.insert(suffix.to_string());
            }
            Err(err) => {
                tracing::debug!("Repeated answer '{}' not materialized: {}", answer_id, err);
                report.skipped.push(SkippedGroup {
                    question_id: answer_id.to_string(),
                    suffix: suffix.to_string(),
                    code: err.error_code(),
                    reason: err.to_string(),
                });
                handled.insert(suffix.to_string());
            }
        }
    }

    report
}

fn materialize(schema: &Schema, base_id: &str, suffix: &str) -> Result<Schema, FormError> {
    let question_set = find_base_set(schema, base_id)
        .ok_or_else(|| FormError::QuestionNotFound(base_id.to_string()))?;
    let question_set_id = question_set.question_set_id.as_str();
    let add_id = format!("add-{}", question_set_id);

    if find_question_set(&add_id, schema).is_some() {
        let new_set = duplicate_question_set(&add_id, schema, suffix)?;
        return insert_question_set(&add_id, new_set, schema);
    }

    let button = find_question_recursive(&question_set.questions, &add_id).ok_or_else(|| {
        FormError::mismatch(question_set_id, "no add-section set or add-questions button for this set")
    })?;
    let input = button
        .input
        .as_ref()
        .ok_or_else(|| FormError::mismatch(&add_id, "button has no input"))?;
    let question_ids = input
        .question_ids
        .as_deref()
        .ok_or_else(|| FormError::mismatch(&add_id, "button has no input.questionIds"))?;

    let duplicates = duplicate_questions(
        question_set_id,
        question_ids,
        input.separator_text.as_deref(),
        schema,
        suffix,
    )?;
    insert_questions(question_set_id, &button.question_id, duplicates, schema)
}

/// Cloned ids are lowercased, so base ids are matched without regard to case.
fn find_base_set<'a>(schema: &'a Schema, base_id: &str) -> Option<&'a QuestionSet> {
    schema.question_sets.iter().find(|qs| {
        tree::find_by(&qs.questions, &|q| q.question_id.eq_ignore_ascii_case(base_id)).is_some()
    })
}

/// Whether a question `<base>_<suffix>` already exists. The base part ignores
/// case; the suffix must match exactly.
fn contains_group(schema: &Schema, base_id: &str, suffix: &str) -> bool {
    schema.question_sets.iter().any(|qs| {
        tree::find_by(&qs.questions, &|q| match q.question_id.rsplit_once('_') {
            Some((base, existing)) => existing == suffix && base.eq_ignore_ascii_case(base_id),
            None => false,
        })
        .is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::types::{ButtonAction, Input, Question, QuestionPanel, QuestionSetRef};
    use serde_json::json;

    fn schema() -> Schema {
        let mut add_section = Input::button(ButtonAction::AddRepeatableSection);
        add_section.panel_id = Some("applicant".into());

        let mut add_questions = Input::button(ButtonAction::AddRepeatableQuestions);
        add_questions.question_ids = Some(vec!["fundingName".into()]);
        add_questions.separator_text = Some("Funder".into());

        Schema {
            question_panels: vec![QuestionPanel {
                panel_id: "applicant".into(),
                question_sets: vec![
                    QuestionSetRef { index: Some(1), question_set_id: "applicant".into() },
                    QuestionSetRef { index: Some(100), question_set_id: "add-applicant".into() },
                ],
                ..Default::default()
            }],
            question_sets: vec![
                QuestionSet::new("applicant", vec![Question::new("applicantName", "Name")]),
                QuestionSet::new(
                    "add-applicant",
                    vec![Question::new("add-applicant", "").with_input(add_section)],
                ),
                QuestionSet::new(
                    "funding",
                    vec![
                        Question::new("fundingName", "Funder name"),
                        Question::new("add-funding", "").with_input(add_questions),
                    ],
                ),
            ],
            ..Default::default()
        }
    }

    fn application(answers: serde_json::Value) -> Application {
        Application {
            question_answers: answers.as_object().cloned().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn materializes_sections_and_question_groups_with_answer_suffix() {
        let app = application(json!({
            "applicantname_Ab1c2": "Jo",
            "fundingname_q1w2e": "Wellcome",
            "applicantName": "Sam"
        }));
        let report = copy_user_repeated_sections(&app, &schema());

        assert_eq!(report.materialized, vec!["Ab1c2", "q1w2e"]);
        assert!(find_question_set("applicant_Ab1c2", &report.schema).is_some());
        let funding = find_question_set("funding", &report.schema).unwrap();
        let ids: Vec<_> = funding.questions.iter().map(|q| q.question_id.as_str()).collect();
        assert_eq!(ids, vec!["fundingName", "fundingname_q1w2e", "removefunding_q1w2e", "add-funding"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn one_clone_per_suffix() {
        let app = application(json!({
            "applicantname_Ab1c2": "Jo",
            "applicantname_zzzzz": "Al",
        }));
        let once = copy_user_repeated_sections(&app, &schema());
        assert_eq!(once.materialized.len(), 2);

        let twice = copy_user_repeated_sections(&app, &once.schema);
        assert!(twice.materialized.is_empty());
        assert_eq!(twice.schema, once.schema);
    }

    #[test]
    fn unknown_base_ids_are_reported_not_fatal() {
        let app = application(json!({ "retired_abcde": "x" }));
        let report = copy_user_repeated_sections(&app, &schema());
        assert_eq!(report.schema, schema());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].code, "QUESTION_NOT_FOUND");
    }

    #[test]
    fn suffixes_differing_only_in_case_are_distinct_groups() {
        let app = application(json!({
            "applicantname_abcde": "Jo",
            "applicantname_ABCDE": "Al",
        }));
        let report = copy_user_repeated_sections(&app, &schema());

        assert_eq!(report.materialized, vec!["ABCDE", "abcde"]);
        assert!(find_question_set("applicant_abcde", &report.schema).is_some());
        assert!(find_question_set("applicant_ABCDE", &report.schema).is_some());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn failed_group_is_reported_once() {
        let app = application(json!({
            "retired_abcde": "x",
            "retiredother_abcde": "y",
        }));
        let report = copy_user_repeated_sections(&app, &schema());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].suffix, "abcde");
    }
}
