use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Question set not found: {0}")]
    QuestionSetNotFound(String),

    #[error("Question panel not found: {0}")]
    PanelNotFound(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Structural mismatch at '{id}': {reason}")]
    StructuralMismatch { id: String, reason: String },

    #[error("Invalid suffix '{suffix}': {reason}")]
    InvalidSuffix { suffix: String, reason: String },

    #[error("No unused suffix found after {attempts} attempts")]
    SuffixExhausted { attempts: u32 },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    pub fn mismatch(id: impl Into<String>, reason: impl Into<String>) -> Self {
        FormError::StructuralMismatch {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Data-shape problems a caller may choose to ignore (the schema is left unchanged).
    /// Everything else is a caller or input error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FormError::QuestionSetNotFound(_)
                | FormError::PanelNotFound(_)
                | FormError::QuestionNotFound(_)
                | FormError::StructuralMismatch { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::QuestionSetNotFound(_) => "QUESTION_SET_NOT_FOUND",
            FormError::PanelNotFound(_) => "PANEL_NOT_FOUND",
            FormError::QuestionNotFound(_) => "QUESTION_NOT_FOUND",
            FormError::StructuralMismatch { .. } => "STRUCTURAL_MISMATCH",
            FormError::InvalidSuffix { .. } => "INVALID_SUFFIX",
            FormError::SuffixExhausted { .. } => "SUFFIX_EXHAUSTED",
            FormError::InvalidSchema(_) => "INVALID_SCHEMA",
            FormError::Json(_) => "INVALID_JSON",
        }
    }
}
