use thiserror::Error;

use crate::roster::ClassSizeError;
use crate::session::Stage;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter a valid positive number for class strength.")]
    MissingOrInvalidClassSize,
    #[error("Class strength cannot be more than {max} students.")]
    ClassSizeAboveLimit { max: u32 },
    #[error("Please enter at least one roll number.")]
    EmptyRollNumberInput,
    #[error("Invalid roll numbers (non-numeric): {}", .0.join(", "))]
    InvalidRollNumberTokens(Vec<String>),
    #[error("Please start and end attendance before downloading.")]
    ExportWithoutData,
    #[error("{action} is not available while {stage}")]
    WrongStage { action: &'static str, stage: Stage },
    #[error("export failed: {0:#}")]
    Export(#[from] anyhow::Error),
}

impl From<ClassSizeError> for SessionError {
    fn from(e: ClassSizeError) -> Self {
        match e {
            ClassSizeError::Invalid => SessionError::MissingOrInvalidClassSize,
            ClassSizeError::AboveLimit(max) => SessionError::ClassSizeAboveLimit { max },
        }
    }
}

impl SessionError {
    /// Stable code sent over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::MissingOrInvalidClassSize => "invalid_class_size",
            SessionError::ClassSizeAboveLimit { .. } => "class_size_above_limit",
            SessionError::EmptyRollNumberInput => "empty_roll_numbers",
            SessionError::InvalidRollNumberTokens(_) => "invalid_roll_numbers",
            SessionError::ExportWithoutData => "no_attendance",
            SessionError::WrongStage { .. } => "wrong_stage",
            SessionError::Export(_) => "export_failed",
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::InvalidRollNumberTokens(tokens) => {
                Some(serde_json::json!({ "tokens": tokens }))
            }
            SessionError::ClassSizeAboveLimit { max } => {
                Some(serde_json::json!({ "maxClassSize": max }))
            }
            SessionError::WrongStage { stage, .. } => {
                Some(serde_json::json!({ "stage": stage.as_str() }))
            }
            _ => None,
        }
    }
}
