//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{GuessNumberInput, RegisterPlayerInput};
use crate::domain::value_objects::{Age, GameId, Guess, PlayerId, PlayerName, positive_id};
use crate::error::GameResult;

// ============================================================================
// Register
// ============================================================================

/// Request for POST /register
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayerRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl RegisterPlayerRequest {
    pub fn into_input(self) -> GameResult<RegisterPlayerInput> {
        Ok(RegisterPlayerInput {
            first_name: PlayerName::new(self.first_name, "firstName")?,
            last_name: PlayerName::new(self.last_name, "lastName")?,
            age: Age::new(self.age)?,
        })
    }
}

/// Response for POST /register
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayerResponse {
    pub player_id: i64,
}

// ============================================================================
// Start
// ============================================================================

/// Request for POST /start
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub player_id: i64,
}

impl StartGameRequest {
    pub fn into_player_id(self) -> GameResult<PlayerId> {
        Ok(positive_id(self.player_id, "playerId")?)
    }
}

/// Response for POST /start
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub game_id: i64,
    pub player_id: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Guess
// ============================================================================

/// Request for POST /guess
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessNumberRequest {
    pub game_id: i64,
    pub attempted_number: String,
}

impl GuessNumberRequest {
    pub fn into_input(self) -> GameResult<GuessNumberInput> {
        let game_id: GameId = positive_id(self.game_id, "gameId")?;
        Ok(GuessNumberInput {
            game_id,
            attempted_number: Guess::parse(&self.attempted_number)?,
        })
    }
}

/// Response for POST /guess
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessNumberResponse {
    pub game_id: i64,
    pub attempted_number: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ValidationError;
    use crate::error::GameError;

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterPlayerRequest =
            serde_json::from_str(r#"{"firstName":" Ana ","lastName":"Lopez","age":30}"#).unwrap();
        let input = req.into_input().unwrap();

        assert_eq!(input.first_name.as_str(), "Ana");
        assert_eq!(input.last_name.as_str(), "Lopez");
        assert_eq!(input.age.years(), 30);
    }

    #[test]
    fn test_register_request_rejects_bad_age() {
        let req = RegisterPlayerRequest {
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            age: 0,
        };
        let err = req.into_input().unwrap_err();
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::AgeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_start_request_rejects_zero_id() {
        let req: StartGameRequest = serde_json::from_str(r#"{"playerId":0}"#).unwrap();
        assert!(matches!(
            req.into_player_id(),
            Err(GameError::Validation(ValidationError::NonPositiveId { field: "playerId" }))
        ));
    }

    #[test]
    fn test_guess_request_keeps_leading_zero() {
        let req: GuessNumberRequest =
            serde_json::from_str(r#"{"gameId":7,"attemptedNumber":"0123"}"#).unwrap();
        let input = req.into_input().unwrap();

        assert_eq!(input.game_id, GameId::new(7));
        assert_eq!(input.attempted_number.as_str(), "0123");
    }

    #[test]
    fn test_guess_request_rejects_short_number() {
        let req = GuessNumberRequest {
            game_id: 1,
            attempted_number: "123".into(),
        };
        assert!(matches!(
            req.into_input(),
            Err(GameError::Validation(ValidationError::NotFourDigits))
        ));
    }

    #[test]
    fn test_start_response_serializes_camel_case() {
        let created_at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_value(StartGameResponse {
            game_id: 3,
            player_id: 1,
            created_at,
        })
        .unwrap();

        assert_eq!(json["gameId"], 3);
        assert_eq!(json["playerId"], 1);
        assert_eq!(json["createdAt"], "2026-01-02T03:04:05Z");
        assert!(json.get("secret").is_none());
    }
}
