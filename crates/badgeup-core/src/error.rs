//! Error types for BadgeUp.

use serde::Serialize;

use crate::ids::{AnswerId, IdError, QuestionId};

/// Result type for BadgeUp core operations.
pub type Result<T> = std::result::Result<T, CommunityError>;

/// Errors that can occur in core operations.
///
/// Every failing operation leaves the community state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommunityError {
    /// A referenced question, domain or badge does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What kind of thing was looked up.
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// The requester is not allowed to perform the action.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Human-readable explanation.
        reason: String,
    },

    /// The question already has a best answer.
    #[error("question {question_id} already has a best answer")]
    AlreadyResolved {
        /// The resolved question.
        question_id: QuestionId,
    },

    /// The selected answer does not belong to the question.
    #[error("answer {answer_id} not found on question {question_id}")]
    AnswerNotFound {
        /// The question that was searched.
        question_id: QuestionId,
        /// The answer that was not found.
        answer_id: AnswerId,
    },

    /// Missing or malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}

/// Coarse error classification handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Something referenced does not exist.
    NotFound,
    /// Author-only action attempted by someone else.
    Forbidden,
    /// Best answer already chosen.
    AlreadyResolved,
    /// Bad input.
    InvalidArgument,
}

impl CommunityError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::AnswerNotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::AlreadyResolved { .. } => ErrorKind::AlreadyResolved,
            Self::InvalidArgument(_) | Self::InvalidId(_) => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_not_found_is_a_not_found() {
        let err = CommunityError::AnswerNotFound {
            question_id: QuestionId::new(1).unwrap(),
            answer_id: AnswerId::new(4).unwrap(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "answer A4 not found on question Q1");
    }

    #[test]
    fn bad_ids_are_invalid_arguments() {
        let err = CommunityError::from(IdError::Empty);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
