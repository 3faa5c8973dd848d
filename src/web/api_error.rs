use crate::config::BoardKind;
use crate::core::board::BoardError;
use crate::core::moderation::ModerationError;
use crate::core::voting::VotingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Banned(String),

    #[error("{0}")]
    ContentRejected(String),

    #[error("Invalid {0}")]
    InvalidInput(&'static str),

    #[error("Invalid vote")]
    InvalidVote,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Already voted")]
    AlreadyVoted,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Translate a core error, naming items the way `kind` does.
    pub fn from_board(err: BoardError, kind: BoardKind) -> Self {
        match err {
            BoardError::Moderation(e @ ModerationError::Banned { .. }) => {
                ApiError::Banned(e.to_string())
            }
            BoardError::Moderation(e @ ModerationError::ContentRejected { .. }) => {
                ApiError::ContentRejected(e.to_string())
            }
            BoardError::Moderation(ModerationError::InvalidInput) => {
                ApiError::InvalidInput(kind.item_noun())
            }
            BoardError::Voting(VotingError::InvalidVote(_)) => ApiError::InvalidVote,
            BoardError::Voting(VotingError::NotFound(_)) => {
                ApiError::NotFound(capitalize(kind.item_noun()))
            }
            BoardError::Voting(VotingError::AlreadyVoted) => ApiError::AlreadyVoted,
            BoardError::Moderation(ModerationError::StorageError(e))
            | BoardError::Voting(VotingError::StorageError(e)) => ApiError::InternalError(e),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Banned(_) | ApiError::ContentRejected(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidInput(_) | ApiError::InvalidVote => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyVoted => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                BoardError::Moderation(ModerationError::Banned {
                    remaining: Duration::minutes(3),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                BoardError::Moderation(ModerationError::ContentRejected {
                    ban: Duration::minutes(10),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                BoardError::Moderation(ModerationError::InvalidInput),
                StatusCode::BAD_REQUEST,
            ),
            (
                BoardError::Voting(VotingError::InvalidVote("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                BoardError::Voting(VotingError::NotFound(9)),
                StatusCode::NOT_FOUND,
            ),
            (
                BoardError::Voting(VotingError::AlreadyVoted),
                StatusCode::CONFLICT,
            ),
            (
                BoardError::Voting(VotingError::StorageError("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from_board(err, BoardKind::Ideas).status(), status);
        }
    }

    #[test]
    fn test_messages_use_board_noun() {
        let not_found = ApiError::from_board(
            BoardError::Voting(VotingError::NotFound(4)),
            BoardKind::Food,
        );
        assert_eq!(not_found.to_string(), "Suggestion not found");

        let invalid = ApiError::from_board(
            BoardError::Moderation(ModerationError::InvalidInput),
            BoardKind::Ideas,
        );
        assert_eq!(invalid.to_string(), "Invalid idea");
    }
}
