//! Game Error Types
//!
//! This module provides game-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::{GameId, PlayerId, ValidationError};

/// Game-specific result type alias
pub type GameResult<T> = Result<T, GameError>;

/// Game-specific error variants
///
/// No variant's message may contain a secret number.
#[derive(Debug, Error)]
pub enum GameError {
    /// Name pair already registered. The ID is for logs only.
    #[error("A player with this first and last name already exists")]
    PlayerAlreadyExists { player_id: PlayerId },

    #[error("Player {0} does not exist")]
    PlayerNotFound(PlayerId),

    #[error("Player already has an active game ({game_id})")]
    ActiveGameExists { game_id: GameId },

    #[error("Game {0} does not exist")]
    GameNotFound(GameId),

    #[error("Game {0} is not active")]
    GameNotActive(GameId),

    /// Guess repeats a digit
    #[error("The attempted number must have 4 unique digits")]
    InvalidAttempt,

    /// Request failed shape validation at the boundary
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Body is not JSON, or does not have the expected fields and types
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::PlayerAlreadyExists { .. } | GameError::ActiveGameExists { .. } => {
                ErrorKind::Conflict
            }
            GameError::PlayerNotFound(_) | GameError::GameNotFound(_) => ErrorKind::NotFound,
            GameError::GameNotActive(_)
            | GameError::InvalidAttempt
            | GameError::Validation(_)
            | GameError::MalformedBody(_) => ErrorKind::BadRequest,
            GameError::StorageUnavailable(_) | GameError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server errors get a fixed message; their cause only goes to the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            GameError::StorageUnavailable(_) | GameError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
            GameError::PlayerAlreadyExists { .. } => AppError::conflict(self.to_string()),
            GameError::ActiveGameExists { .. } => AppError::conflict(self.to_string())
                .with_action("Finish the current game before starting a new one"),
            GameError::PlayerNotFound(_) | GameError::GameNotFound(_) => {
                AppError::not_found(self.to_string())
            }
            GameError::InvalidAttempt => {
                AppError::bad_request(self.to_string()).with_action("Do not repeat digits")
            }
            GameError::GameNotActive(_) | GameError::Validation(_) | GameError::MalformedBody(_) => {
                AppError::bad_request(self.to_string())
            }
        }
    }

    /// Log the error with a level matching its response class
    fn log(&self, app_error: &AppError) {
        if app_error.is_server_error() {
            tracing::error!(error = %self, status = app_error.status_code(), "Game request failed");
        } else if let GameError::PlayerAlreadyExists { player_id } = self {
            tracing::warn!(existing_player_id = %player_id, "Duplicate player registration");
        } else if app_error.is_client_error() {
            tracing::debug!(error = %self, status = app_error.status_code(), "Game request rejected");
        }
    }
}

impl From<JsonRejection> for GameError {
    fn from(rejection: JsonRejection) -> Self {
        GameError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let app_error = self.to_app_error();
        self.log(&app_error);
        app_error.into_response()
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        err.to_app_error()
    }
}
