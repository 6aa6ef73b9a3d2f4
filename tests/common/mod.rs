#![allow(dead_code)]

use gateway_forms_rust::form::types::{Answers, Application, Schema};
use serde_json::Value;
use std::collections::HashSet;

/// A cut-down data access request form: an applicant section that can be
/// repeated, a funding set with an inline repeatable question group nested
/// inside a conditional branch, and three levels of conditional questions.
pub fn dar_schema_value() -> Value {
    serde_json::from_str(include_str!("dar_schema.json")).expect("fixture schema is valid JSON")
}

pub fn dar_schema() -> Schema {
    Schema::from_value(dar_schema_value()).expect("fixture schema deserializes")
}

pub fn answers(value: Value) -> Answers {
    value.as_object().cloned().expect("answers fixture is an object")
}

pub fn application(value: Value) -> Application {
    Application {
        question_answers: answers(value),
        ..Default::default()
    }
}

pub fn panel_refs<'a>(schema: &'a Schema, panel_id: &str) -> Vec<&'a str> {
    schema
        .question_panels
        .iter()
        .find(|p| p.panel_id == panel_id)
        .map(|p| p.question_sets.iter().map(|r| r.question_set_id.as_str()).collect())
        .unwrap_or_default()
}

pub fn set_ids(schema: &Schema) -> HashSet<&str> {
    schema.question_sets.iter().map(|qs| qs.question_set_id.as_str()).collect()
}

pub fn assert_unique_ids(schema: &Schema) {
    let ids = schema.question_ids();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len(), "duplicate question ids in {:?}", ids);
}
