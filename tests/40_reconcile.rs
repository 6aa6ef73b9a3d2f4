mod common;

use gateway_forms_rust::form::locator::{find_question_recursive, find_question_set};
use gateway_forms_rust::services::DynamicFormService;
use serde_json::json;

#[test]
fn every_repeated_answer_gets_a_slot() {
    let schema = common::dar_schema();
    let service = DynamicFormService::with_options(false, 10);
    let app = common::application(json!({
        "safepeopleprimaryapplicantfullname": "Sam Smith",
        "safepeopleprimaryapplicantfullname_Ab1c2": "Jo Bloggs",
        "safepeopleprimaryapplicantonsnumber_Ab1c2": "ONS-123",
        "safeprojectfundingfundername_q1w2e": "Wellcome",
        "safeprojectfundingfunderreference_q1w2e": "WT-001"
    }));

    let report = service.copy_user_repeated_sections(&app, &schema);

    assert_eq!(report.materialized, vec!["Ab1c2", "q1w2e"]);
    assert!(report.skipped.is_empty());
    for key in app.question_answers.keys() {
        let present = report
            .schema
            .question_sets
            .iter()
            .any(|qs| find_question_recursive(&qs.questions, key).is_some());
        assert!(present, "no slot for answer {}", key);
    }
    assert!(find_question_set("primaryapplicant_Ab1c2", &report.schema).is_some());
    assert_eq!(
        common::panel_refs(&report.schema, "primaryapplicant"),
        vec!["primaryapplicant", "primaryapplicant_Ab1c2", "add-primaryapplicant"]
    );
    common::assert_unique_ids(&report.schema);
}

#[test]
fn reconciling_twice_is_a_no_op() {
    let schema = common::dar_schema();
    let service = DynamicFormService::with_options(false, 10);
    let app = common::application(json!({
        "safepeopleprimaryapplicantfullname_Ab1c2": "Jo Bloggs",
        "safepeopleprimaryapplicantfullname_Zz9y8": "Al Jones",
        "safeprojectfundingfundername_q1w2e": "Wellcome"
    }));

    let first = service.copy_user_repeated_sections(&app, &schema);
    let second = service.copy_user_repeated_sections(&app, &first.schema);

    assert_eq!(first.materialized.len(), 3);
    assert!(second.materialized.is_empty());
    assert_eq!(second.schema, first.schema);
    assert_eq!(first.schema.question_sets.len(), schema.question_sets.len() + 2);
}

#[test]
fn answers_for_retired_questions_are_skipped() {
    let schema = common::dar_schema();
    let service = DynamicFormService::with_options(false, 10);
    let app = common::application(json!({ "retiredquestion_abcde": "x", "plainanswer": "y" }));

    let report = service.copy_user_repeated_sections(&app, &schema);

    assert!(report.materialized.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].question_id, "retiredquestion_abcde");
    assert_eq!(report.schema, schema);
}

#[test]
fn suffixes_differing_only_in_case_each_get_a_slot() {
    let service = DynamicFormService::with_options(false, 10);
    let added = service
        .add_repeatable_section_with_suffix(&common::dar_schema(), "add-primaryapplicant", "abcde")
        .unwrap();
    let app = common::application(json!({
        "safepeopleprimaryapplicantfullname_abcde": "Jo Bloggs",
        "safepeopleprimaryapplicantfullname_ABCDE": "Al Jones"
    }));

    let report = service.copy_user_repeated_sections(&app, &added.schema);

    assert_eq!(report.materialized, vec!["ABCDE"]);
    assert!(report.skipped.is_empty());
    for key in app.question_answers.keys() {
        let present = report
            .schema
            .question_sets
            .iter()
            .any(|qs| find_question_recursive(&qs.questions, key).is_some());
        assert!(present, "no slot for answer {}", key);
    }
    common::assert_unique_ids(&report.schema);
}
