use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Flat mapping from questionId to answer value.
/// Conditional questions still get a top-level key here even though they nest in the schema.
pub type Answers = Map<String, Value>;

/// Root form document: pages, panels, question sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub form_panels: Vec<FormPanel>,
    #[serde(default)]
    pub question_panels: Vec<QuestionPanel>,
    #[serde(default)]
    pub question_sets: Vec<QuestionSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Places a panel on a page at a display index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPanel {
    pub panel_id: String,
    pub page_id: String,
    #[serde(default)]
    pub index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPanel {
    pub panel_id: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_panel_header_text: Option<String>,
    #[serde(default)]
    pub question_sets: Vec<QuestionSetRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference from a panel to an entry of `Schema::question_sets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSetRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    pub question_set_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub question_set_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_set_header: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node of the question tree. Options of choice inputs may carry
/// conditional questions, which are themselves `Question`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Input>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<InputOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_questions: Option<Vec<Question>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub const BUTTON_INPUT: &str = "buttonInput";
pub const RADIO_OPTIONS_INPUT: &str = "radioOptionsInput";
pub const CHECKBOX_OPTIONS_INPUT: &str = "checkboxOptionsInput";

/// Actions carried by `buttonInput` questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    AddRepeatableSection,
    RemoveRepeatableSection,
    AddRepeatableQuestions,
    RemoveRepeatableQuestions,
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::AddRepeatableSection => "addRepeatableSection",
            ButtonAction::RemoveRepeatableSection => "removeRepeatableSection",
            ButtonAction::AddRepeatableQuestions => "addRepeatableQuestions",
            ButtonAction::RemoveRepeatableQuestions => "removeRepeatableQuestions",
        }
    }
}

impl FromStr for ButtonAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addRepeatableSection" => Ok(ButtonAction::AddRepeatableSection),
            "removeRepeatableSection" => Ok(ButtonAction::RemoveRepeatableSection),
            "addRepeatableQuestions" => Ok(ButtonAction::AddRepeatableQuestions),
            "removeRepeatableQuestions" => Ok(ButtonAction::RemoveRepeatableQuestions),
            other => Err(format!("unknown button action '{}'", other)),
        }
    }
}

/// The parts of a data access request application the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub question_answers: Answers,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    pub fn new(question_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }

    /// Parsed button action, if this question is an action button
    pub fn action(&self) -> Option<ButtonAction> {
        let input = self.input.as_ref()?;
        if input.kind != BUTTON_INPUT {
            return None;
        }
        input.action.as_deref()?.parse().ok()
    }

    pub fn panel_id(&self) -> Option<&str> {
        self.input.as_ref()?.panel_id.as_deref()
    }

    pub fn options(&self) -> &[InputOption] {
        self.input
            .as_ref()
            .and_then(|i| i.options.as_deref())
            .unwrap_or(&[])
    }

    /// Conditional question lists hanging off this question's options
    pub fn branches(&self) -> impl Iterator<Item = &Vec<Question>> + '_ {
        self.options()
            .iter()
            .filter_map(|o| o.conditional_questions.as_ref())
            .filter(|qs| !qs.is_empty())
    }

    pub fn branches_mut(&mut self) -> impl Iterator<Item = &mut Vec<Question>> + '_ {
        self.input
            .iter_mut()
            .flat_map(|i| i.options.iter_mut().flatten())
            .filter_map(|o| o.conditional_questions.as_mut())
    }
}

impl Input {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn button(action: ButtonAction) -> Self {
        Self {
            kind: BUTTON_INPUT.to_string(),
            action: Some(action.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: Vec<InputOption>) -> Self {
        self.options = Some(options);
        self
    }
}

impl InputOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
            ..Default::default()
        }
    }

    pub fn with_conditional(mut self, questions: Vec<Question>) -> Self {
        self.conditional_questions = Some(questions);
        self
    }
}

impl QuestionSet {
    pub fn new(question_set_id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            question_set_id: question_set_id.into(),
            questions,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question_set_id.is_empty()
    }
}

impl QuestionPanel {
    pub fn references(&self, question_set_id: &str) -> bool {
        self.question_sets
            .iter()
            .any(|r| r.question_set_id == question_set_id)
    }
}

impl Schema {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn question_set_mut(&mut self, question_set_id: &str) -> Option<&mut QuestionSet> {
        self.question_sets
            .iter_mut()
            .find(|qs| qs.question_set_id == question_set_id)
    }

    pub fn question_panel_mut(&mut self, panel_id: &str) -> Option<&mut QuestionPanel> {
        self.question_panels.iter_mut().find(|p| p.panel_id == panel_id)
    }

    /// Every questionId in the schema, including nested conditional questions
    pub fn question_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for qs in &self.question_sets {
            super::tree::visit(&qs.questions, &mut |q| ids.push(q.question_id.as_str()));
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_persisted_shape_and_keeps_unknown_keys() {
        let raw = json!({
            "pages": [{ "pageId": "safepeople", "title": "Safe people", "active": true }],
            "formPanels": [{ "panelId": "applicant", "pageId": "safepeople", "index": 1 }],
            "questionPanels": [{
                "panelId": "applicant",
                "pageId": "safepeople",
                "questionSets": [{ "index": 1, "questionSetId": "applicant" }]
            }],
            "questionSets": [{
                "questionSetId": "applicant",
                "questions": [{
                    "questionId": "fullname",
                    "question": "Full name",
                    "input": { "type": "textInput", "required": true },
                    "lockedQuestion": 0
                }]
            }],
            "publisher": "ALLIANCE"
        });

        let schema = Schema::from_value(raw).unwrap();
        assert_eq!(schema.question_sets[0].questions[0].question_id, "fullname");
        assert_eq!(schema.extra.get("publisher"), Some(&json!("ALLIANCE")));

        let back = schema.to_value().unwrap();
        assert_eq!(back["questionSets"][0]["questions"][0]["input"]["required"], json!(true));
        assert_eq!(back["questionSets"][0]["questions"][0]["lockedQuestion"], json!(0));
    }

    #[test]
    fn action_only_reported_for_buttons() {
        let button = Question::new("add-funder", "")
            .with_input(Input::button(ButtonAction::AddRepeatableSection));
        assert_eq!(button.action(), Some(ButtonAction::AddRepeatableSection));

        let mut not_button = Input::new("textInput");
        not_button.action = Some("addRepeatableSection".into());
        let text = Question::new("name", "Name").with_input(not_button);
        assert_eq!(text.action(), None);
    }

    #[test]
    fn question_ids_include_nested_branches() {
        let nested = Question::new("child", "Child");
        let parent = Question::new("parent", "Parent").with_input(
            Input::new(RADIO_OPTIONS_INPUT)
                .with_options(vec![InputOption::new("Yes").with_conditional(vec![nested])]),
        );
        let schema = Schema {
            question_sets: vec![QuestionSet::new("set", vec![parent])],
            ..Default::default()
        };
        assert_eq!(schema.question_ids(), vec!["parent", "child"]);
    }
}
