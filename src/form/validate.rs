use serde::Serialize;
use std::collections::HashSet;

use super::types::Schema;

/// A consistency problem found in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    DuplicateQuestionId { question_id: String },
    DuplicateQuestionSetId { question_set_id: String },
    DanglingQuestionSetRef { panel_id: String, question_set_id: String },
    UnknownPage { panel_id: String, page_id: String },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::DuplicateQuestionId { question_id } => {
                write!(f, "question id '{}' is used more than once", question_id)
            }
            Violation::DuplicateQuestionSetId { question_set_id } => {
                write!(f, "question set id '{}' is used more than once", question_set_id)
            }
            Violation::DanglingQuestionSetRef { panel_id, question_set_id } => write!(
                f,
                "panel '{}' references missing question set '{}'",
                panel_id, question_set_id
            ),
            Violation::UnknownPage { panel_id, page_id } => {
                write!(f, "form panel '{}' is placed on unknown page '{}'", panel_id, page_id)
            }
        }
    }
}

/// Check the invariants clone and remove operations rely on.
pub fn validate_schema(schema: &Schema) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut set_ids = HashSet::new();
    for qs in &schema.question_sets {
        if !set_ids.insert(qs.question_set_id.as_str()) {
            violations.push(Violation::DuplicateQuestionSetId {
                question_set_id: qs.question_set_id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in schema.question_ids() {
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id) && reported.insert(id) {
            violations.push(Violation::DuplicateQuestionId { question_id: id.to_string() });
        }
    }

    for panel in &schema.question_panels {
        for reference in &panel.question_sets {
            if !set_ids.contains(reference.question_set_id.as_str()) {
                violations.push(Violation::DanglingQuestionSetRef {
                    panel_id: panel.panel_id.clone(),
                    question_set_id: reference.question_set_id.clone(),
                });
            }
        }
    }

    if !schema.pages.is_empty() {
        let page_ids: HashSet<&str> = schema.pages.iter().map(|p| p.page_id.as_str()).collect();
        for form_panel in &schema.form_panels {
            if !page_ids.contains(form_panel.page_id.as_str()) {
                violations.push(Violation::UnknownPage {
                    panel_id: form_panel.panel_id.clone(),
                    page_id: form_panel.page_id.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::types::{FormPanel, Page, Question, QuestionPanel, QuestionSet, QuestionSetRef};

    #[test]
    fn clean_schema_has_no_violations() {
        let schema = Schema {
            pages: vec![Page { page_id: "p".into(), ..Default::default() }],
            form_panels: vec![FormPanel { panel_id: "a".into(), page_id: "p".into(), index: 1 }],
            question_panels: vec![QuestionPanel {
                panel_id: "a".into(),
                question_sets: vec![QuestionSetRef { index: None, question_set_id: "a".into() }],
                ..Default::default()
            }],
            question_sets: vec![QuestionSet::new("a", vec![Question::new("q", "Q")])],
            ..Default::default()
        };
        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn reports_each_kind_once() {
        let schema = Schema {
            pages: vec![Page { page_id: "p".into(), ..Default::default() }],
            form_panels: vec![FormPanel { panel_id: "a".into(), page_id: "gone".into(), index: 1 }],
            question_panels: vec![QuestionPanel {
                panel_id: "a".into(),
                question_sets: vec![QuestionSetRef { index: None, question_set_id: "b".into() }],
                ..Default::default()
            }],
            question_sets: vec![QuestionSet::new(
                "a",
                vec![Question::new("q", "Q"), Question::new("q", "Q"), Question::new("q", "Q")],
            )],
            ..Default::default()
        };

        let violations = validate_schema(&schema);
        assert_eq!(
            violations,
            vec![
                Violation::DuplicateQuestionId { question_id: "q".into() },
                Violation::DanglingQuestionSetRef { panel_id: "a".into(), question_set_id: "b".into() },
                Violation::UnknownPage { panel_id: "a".into(), page_id: "gone".into() },
            ]
        );
    }
}
