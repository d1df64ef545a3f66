//! Error taxonomy shared by loading, quiz construction and session access.

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Data source unreachable or answered with a failure status.
    #[error("failed to load vocabulary data: {0}")]
    Load(String),

    /// Data or configuration JSON that does not have the expected shape.
    #[error("vocabulary data is not well-formed: {0}")]
    DataFormat(String),

    /// The chosen chapters / fields leave nothing to ask. Recoverable: the user
    /// broadens the selection and starts again.
    #[error("no vocabulary found for the selected chapters")]
    EmptySelection,

    #[error("invalid quiz configuration: {0}")]
    InvalidConfiguration(String),

    /// Caller bug: an operation was used in a state that does not allow it.
    #[error("`{operation}` is not valid while the quiz is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl QuizError {
    /// Stable identifier used by the page to pick a message.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::Load(_) => "load_error",
            QuizError::DataFormat(_) => "data_format_error",
            QuizError::EmptySelection => "empty_selection",
            QuizError::InvalidConfiguration(_) => "invalid_configuration",
            QuizError::InvalidState { .. } => "invalid_state",
        }
    }

    /// Whether the user can recover without reloading the data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::EmptySelection | QuizError::InvalidConfiguration(_)
        )
    }
}

impl From<QuizError> for wasm_bindgen::JsValue {
    fn from(err: QuizError) -> Self {
        let js_err = js_sys::Error::new(&err.to_string());
        js_err.set_name(err.kind());
        js_err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(QuizError::Load("x".into()).kind(), "load_error");
        assert_eq!(QuizError::DataFormat("x".into()).kind(), "data_format_error");
        assert_eq!(QuizError::EmptySelection.kind(), "empty_selection");
        assert_eq!(
            QuizError::InvalidState {
                operation: "result",
                state: SessionState::InProgress
            }
            .kind(),
            "invalid_state"
        );
    }

    #[test]
    fn only_selection_problems_are_recoverable() {
        assert!(QuizError::EmptySelection.is_recoverable());
        assert!(QuizError::InvalidConfiguration("zero".into()).is_recoverable());
        assert!(!QuizError::Load("404".into()).is_recoverable());
        assert!(!QuizError::DataFormat("not an array".into()).is_recoverable());
    }

    #[test]
    fn invalid_state_message_names_operation_and_state() {
        let err = QuizError::InvalidState {
            operation: "current_question",
            state: SessionState::Finished,
        };
        assert_eq!(
            err.to_string(),
            "`current_question` is not valid while the quiz is finished"
        );
    }
}
