//! Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Schema operations exposed by the form service
/// Used in log lines and CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddSection,
    RemoveSection,
    AddQuestions,
    RemoveQuestions,
    Reconcile,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AddSection => "add_section",
            Operation::RemoveSection => "remove_section",
            Operation::AddQuestions => "add_questions",
            Operation::RemoveQuestions => "remove_questions",
            Operation::Reconcile => "reconcile",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
